use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::forms::{check_min_len, FieldErrors};

/// Job-seeker profile form. Only the name is mandatory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeekerProfileForm {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

pub fn validate_profile(form: &SeekerProfileForm) -> Result<(), AppError> {
    let mut errors = FieldErrors::new();
    check_min_len(&mut errors, "name", &form.name, 2, "Name");
    errors.into_result()
}
