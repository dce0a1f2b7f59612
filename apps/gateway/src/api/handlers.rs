/// Bearer-enforcing proxy routes under `/api`.
///
/// Pure passthrough: the presence of a well-formed `Authorization: Bearer`
/// header is the only thing checked here. The backend's status and body are
/// relayed verbatim; no retry, no caching.
use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use reqwest::Method;
use serde_json::Value;

use crate::errors::AppError;
use crate::state::AppState;

/// GET /api/applications
pub async fn list_applications(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let token = bearer_token(&headers).ok_or(AppError::Unauthorized)?;
    let (status, body) = state
        .backend
        .forward(Method::GET, "/applications", token, None)
        .await?;
    Ok(relay(status, body))
}

/// POST /api/applications
pub async fn create_application(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<Value>,
) -> Result<Response, AppError> {
    let token = bearer_token(&headers).ok_or(AppError::Unauthorized)?;
    let (status, body) = state
        .backend
        .forward(Method::POST, "/applications", token, Some(&payload))
        .await?;
    Ok(relay(status, body))
}

/// Extracts the token from a well-formed `Bearer <token>` header.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .filter(|token| !token.trim().is_empty())
}

fn relay(status: u16, body: Value) -> Response {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
    (status, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_auth(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_extracted() {
        let headers = headers_with_auth("Bearer abc123");
        assert_eq!(bearer_token(&headers), Some("abc123"));
    }

    #[test]
    fn test_missing_header_rejected() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_wrong_scheme_rejected() {
        for value in ["Basic abc123", "bearer abc123", "Token abc123", "abc123"] {
            let headers = headers_with_auth(value);
            assert_eq!(bearer_token(&headers), None, "value: {value}");
        }
    }

    #[test]
    fn test_empty_token_rejected() {
        let headers = headers_with_auth("Bearer ");
        assert_eq!(bearer_token(&headers), None);
    }
}
