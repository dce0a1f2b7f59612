use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::forms::{check_min_len, check_one_of, check_required, check_url, FieldErrors};

pub const JOB_TYPES: &[&str] = &["full-time", "part-time", "contract", "internship"];
pub const JOB_STATUSES: &[&str] = &["active", "closed"];
/// Employers may move an application out of pending, never back into it.
pub const REVIEW_STATUSES: &[&str] = &["shortlisted", "rejected"];

/// Job posting form, shared by create and edit. `status` only appears on
/// edit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobForm {
    pub title: String,
    pub description: String,
    pub requirements: String,
    #[serde(rename = "type")]
    pub job_type: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    pub experience: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

pub fn validate_job(form: &JobForm, require_status: bool) -> Result<(), AppError> {
    let mut errors = FieldErrors::new();
    check_min_len(&mut errors, "title", &form.title, 2, "Title");
    check_min_len(&mut errors, "description", &form.description, 10, "Description");
    check_min_len(
        &mut errors,
        "requirements",
        &form.requirements,
        10,
        "Requirements",
    );
    check_one_of(&mut errors, "type", &form.job_type, JOB_TYPES, "Job type");
    check_min_len(&mut errors, "location", &form.location, 2, "Location");
    check_required(&mut errors, "experience", &form.experience, "Experience");
    match (&form.status, require_status) {
        (Some(status), _) => {
            check_one_of(&mut errors, "status", status, JOB_STATUSES, "Status");
        }
        (None, true) => errors.push("status", "Status is required"),
        (None, false) => {}
    }
    errors.into_result()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdateForm {
    pub status: String,
}

pub fn validate_status_update(form: &StatusUpdateForm) -> Result<(), AppError> {
    let mut errors = FieldErrors::new();
    check_one_of(
        &mut errors,
        "status",
        &form.status,
        REVIEW_STATUSES,
        "Status",
    );
    errors.into_result()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployerProfileForm {
    pub name: String,
    pub company: String,
    pub industry: String,
    pub company_size: String,
    pub location: String,
    pub description: String,
    pub website: String,
}

pub fn validate_employer_profile(form: &EmployerProfileForm) -> Result<(), AppError> {
    let mut errors = FieldErrors::new();
    check_min_len(&mut errors, "name", &form.name, 2, "Name");
    check_min_len(&mut errors, "company", &form.company, 2, "Company name");
    check_min_len(&mut errors, "industry", &form.industry, 2, "Industry");
    check_required(&mut errors, "companySize", &form.company_size, "Company size");
    check_min_len(&mut errors, "location", &form.location, 2, "Location");
    check_min_len(
        &mut errors,
        "description",
        &form.description,
        10,
        "Company description",
    );
    check_url(&mut errors, "website", &form.website, "website");
    errors.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job_form() -> JobForm {
        JobForm {
            title: "Rust Engineer".to_string(),
            description: "Build and run backend services.".to_string(),
            requirements: "3+ years of systems programming.".to_string(),
            job_type: "full-time".to_string(),
            location: "Remote".to_string(),
            salary: None,
            experience: "3-5 years".to_string(),
            status: None,
        }
    }

    #[test]
    fn test_create_job_without_status_passes() {
        assert!(validate_job(&job_form(), false).is_ok());
    }

    #[test]
    fn test_edit_job_requires_status() {
        match validate_job(&job_form(), true) {
            Err(AppError::Validation(errors)) => {
                assert_eq!(errors.get("status"), Some("Status is required"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_edit_job_with_valid_status_passes() {
        let form = JobForm {
            status: Some("closed".to_string()),
            ..job_form()
        };
        assert!(validate_job(&form, true).is_ok());
    }

    #[test]
    fn test_unknown_job_type_rejected() {
        let form = JobForm {
            job_type: "freelance".to_string(),
            ..job_form()
        };
        assert!(validate_job(&form, false).is_err());
    }

    #[test]
    fn test_unknown_job_status_rejected() {
        let form = JobForm {
            status: Some("archived".to_string()),
            ..job_form()
        };
        assert!(validate_job(&form, true).is_err());
    }

    #[test]
    fn test_blank_experience_rejected() {
        let form = JobForm {
            experience: "  ".to_string(),
            ..job_form()
        };
        assert!(validate_job(&form, false).is_err());
    }

    #[test]
    fn test_review_status_accepts_transitions_out_of_pending() {
        for status in ["shortlisted", "rejected"] {
            let form = StatusUpdateForm {
                status: status.to_string(),
            };
            assert!(validate_status_update(&form).is_ok(), "status: {status}");
        }
    }

    #[test]
    fn test_review_status_rejects_pending_and_garbage() {
        for status in ["pending", "hired", ""] {
            let form = StatusUpdateForm {
                status: status.to_string(),
            };
            assert!(validate_status_update(&form).is_err(), "status: {status}");
        }
    }

    fn employer_profile() -> EmployerProfileForm {
        EmployerProfileForm {
            name: "Erin Smith".to_string(),
            company: "Acme".to_string(),
            industry: "Software".to_string(),
            company_size: "11-50".to_string(),
            location: "Berlin".to_string(),
            description: "We build developer tools.".to_string(),
            website: "https://acme.example.com".to_string(),
        }
    }

    #[test]
    fn test_valid_employer_profile_passes() {
        assert!(validate_employer_profile(&employer_profile()).is_ok());
    }

    #[test]
    fn test_employer_profile_rejects_bad_website() {
        let form = EmployerProfileForm {
            website: "acme.example.com".to_string(),
            ..employer_profile()
        };
        match validate_employer_profile(&form) {
            Err(AppError::Validation(errors)) => {
                assert_eq!(errors.get("website"), Some("Invalid website URL"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
