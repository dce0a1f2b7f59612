use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::forms::{check_email, check_min_len, check_one_of, FieldErrors};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub user_type: String,
}

pub fn validate_login(form: &LoginForm) -> Result<(), AppError> {
    let mut errors = FieldErrors::new();
    check_email(&mut errors, "email", &form.email);
    check_min_len(&mut errors, "password", &form.password, 6, "Password");
    errors.into_result()
}

pub fn validate_register(form: &RegisterForm) -> Result<(), AppError> {
    let mut errors = FieldErrors::new();
    check_min_len(&mut errors, "name", &form.name, 2, "Name");
    check_email(&mut errors, "email", &form.email);
    check_min_len(&mut errors, "password", &form.password, 6, "Password");
    if form.password != form.confirm_password {
        errors.push("confirmPassword", "Passwords don't match");
    }
    check_one_of(
        &mut errors,
        "userType",
        &form.user_type,
        &["jobseeker", "employer"],
        "Account type",
    );
    errors.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_form() -> RegisterForm {
        RegisterForm {
            name: "Dana Doe".to_string(),
            email: "dana@example.com".to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret1".to_string(),
            user_type: "jobseeker".to_string(),
        }
    }

    #[test]
    fn test_valid_register_passes() {
        assert!(validate_register(&register_form()).is_ok());
    }

    #[test]
    fn test_register_rejects_password_mismatch() {
        let form = RegisterForm {
            confirm_password: "different".to_string(),
            ..register_form()
        };
        match validate_register(&form) {
            Err(AppError::Validation(errors)) => {
                assert_eq!(errors.get("confirmPassword"), Some("Passwords don't match"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_register_rejects_unknown_user_type() {
        let form = RegisterForm {
            user_type: "admin".to_string(),
            ..register_form()
        };
        assert!(validate_register(&form).is_err());
    }

    #[test]
    fn test_register_rejects_short_password() {
        let form = RegisterForm {
            password: "abc".to_string(),
            confirm_password: "abc".to_string(),
            ..register_form()
        };
        assert!(validate_register(&form).is_err());
    }

    #[test]
    fn test_login_rejects_bad_email() {
        let form = LoginForm {
            email: "not-an-email".to_string(),
            password: "secret1".to_string(),
        };
        match validate_login(&form) {
            Err(AppError::Validation(errors)) => {
                assert!(errors.get("email").is_some());
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_login_accepts_valid_credentials_shape() {
        let form = LoginForm {
            email: "dana@example.com".to_string(),
            password: "secret1".to_string(),
        };
        assert!(validate_login(&form).is_ok());
    }
}
