use std::collections::BTreeMap;

use serde::Serialize;

use crate::errors::AppError;

/// Per-field validation messages, keyed by the wire name of the field.
/// Empty means the form passed.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        // First message per field wins, matching inline form display.
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Converts a non-empty error set into the blocking validation error.
    pub fn into_result(self) -> Result<(), AppError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(self))
        }
    }

    pub fn single(field: &'static str, message: impl Into<String>) -> AppError {
        let mut errors = Self::new();
        errors.push(field, message);
        AppError::Validation(errors)
    }
}

pub fn check_min_len(
    errors: &mut FieldErrors,
    field: &'static str,
    value: &str,
    min: usize,
    label: &str,
) {
    if value.trim().chars().count() < min {
        errors.push(field, format!("{label} must be at least {min} characters"));
    }
}

pub fn check_required(errors: &mut FieldErrors, field: &'static str, value: &str, label: &str) {
    if value.trim().is_empty() {
        errors.push(field, format!("{label} is required"));
    }
}

pub fn check_email(errors: &mut FieldErrors, field: &'static str, value: &str) {
    if !is_email(value) {
        errors.push(field, "Invalid email address");
    }
}

pub fn check_url(errors: &mut FieldErrors, field: &'static str, value: &str, label: &str) {
    if !is_url(value) {
        errors.push(field, format!("Invalid {label} URL"));
    }
}

pub fn check_one_of(
    errors: &mut FieldErrors,
    field: &'static str,
    value: &str,
    allowed: &[&str],
    label: &str,
) {
    if !allowed.contains(&value) {
        errors.push(
            field,
            format!("{label} must be one of: {}", allowed.join(", ")),
        );
    }
}

fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || value.contains(char::is_whitespace) {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

fn is_url(value: &str) -> bool {
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"));
    match rest {
        Some(host) => !host.is_empty() && !host.starts_with('/'),
        None => false,
    }
}
