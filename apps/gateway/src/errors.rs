use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::auth::session;
use crate::backend::BackendError;
use crate::forms::FieldErrors;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    /// A proxy request arrived without a well-formed bearer header.
    #[error("Unauthorized")]
    Unauthorized,

    /// The backend rejected the session token, or no session was present
    /// where one is required. Clears both cookies and sends the client back
    /// to login.
    #[error("Session expired")]
    SessionExpired,

    #[error("Validation failed")]
    Validation(FieldErrors),

    /// A non-2xx backend response relayed with its status and message.
    #[error("Upstream error (status {status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Maps a backend failure for flows where a 401 means "bad credentials",
    /// not "stale session" (login, register).
    pub fn upstream(err: BackendError) -> Self {
        match err {
            BackendError::Api { status, message } => AppError::Upstream { status, message },
            other => AppError::Internal(anyhow::Error::new(other)),
        }
    }
}

/// Default conversion for page flows: a backend 401 invalidates the session.
impl From<BackendError> for AppError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Api { status: 401, .. } => AppError::SessionExpired,
            BackendError::Api { status, message } => AppError::Upstream { status, message },
            other => AppError::Internal(anyhow::Error::new(other)),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "message": "Unauthorized" })),
            )
                .into_response(),
            AppError::SessionExpired => {
                let mut response = Redirect::to(session::LOGIN_PATH).into_response();
                for cookie in session::removal_cookies() {
                    if let Ok(value) = HeaderValue::from_str(&cookie.to_string()) {
                        response.headers_mut().append(header::SET_COOKIE, value);
                    }
                }
                response
            }
            AppError::Validation(fields) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "message": "Validation failed", "fields": fields })),
            )
                .into_response(),
            AppError::Upstream { status, message } => {
                let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
                (status, Json(json!({ "message": message }))).into_response()
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                generic_failure()
            }
        }
    }
}

/// The fixed message for transport, parse, and other unexpected failures.
/// Details stay in the logs.
fn generic_failure() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "message": "An error occurred" })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_401_becomes_session_expired() {
        let err = AppError::from(BackendError::Api {
            status: 401,
            message: "Unauthorized".to_string(),
        });
        assert!(matches!(err, AppError::SessionExpired));
    }

    #[test]
    fn test_backend_error_relays_status_and_message() {
        let err = AppError::from(BackendError::Api {
            status: 409,
            message: "Already applied".to_string(),
        });
        match err {
            AppError::Upstream { status, message } => {
                assert_eq!(status, 409);
                assert_eq!(message, "Already applied");
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn test_login_401_stays_upstream() {
        let err = AppError::upstream(BackendError::Api {
            status: 401,
            message: "Invalid credentials".to_string(),
        });
        assert!(matches!(err, AppError::Upstream { status: 401, .. }));
    }

    #[test]
    fn test_session_expired_clears_cookies_and_redirects() {
        let response = AppError::SessionExpired.into_response();
        assert!(response.status().is_redirection());
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            session::LOGIN_PATH
        );
        let cleared: Vec<_> = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .collect();
        assert_eq!(cleared.len(), 2);
    }
}
