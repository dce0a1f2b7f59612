/// Backend API client — the single point of entry for all calls to the
/// job-board backend.
///
/// ARCHITECTURAL RULE: no other module may issue HTTP to the backend
/// directly. Pages, proxies, and auth flows all go through this client.
///
/// No retries anywhere: every failure surfaces to the caller and recovery
/// is user-initiated.
use reqwest::{Client, Method, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::auth::forms::LoginForm;
use crate::models::user::LoginResponse;

const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

/// Fallback when an upstream error body carries no usable `message`.
pub const DEFAULT_UPSTREAM_MESSAGE: &str = "Request failed";

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("backend error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
    auth_url: String,
}

impl BackendClient {
    pub fn new(base_url: &str, auth_url: &str) -> Self {
        Self {
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("Failed to build HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_url: auth_url.trim_end_matches('/').to_string(),
        }
    }

    /// POST {auth_url}/auth/login — the only call routed at the auth
    /// upstream, which may be deployed separately from the main API.
    pub async fn login(&self, credentials: &LoginForm) -> Result<LoginResponse, BackendError> {
        let request = self
            .client
            .post(format!("{}/auth/login", self.auth_url))
            .json(credentials);
        let value = self.execute(request).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn register(&self, payload: &Value) -> Result<Value, BackendError> {
        self.execute(self.request(Method::POST, "/auth/register", None).json(payload))
            .await
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> Result<T, BackendError> {
        let value = self.execute(self.request(Method::GET, path, token)).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &B,
    ) -> Result<T, BackendError> {
        let request = self.request(Method::POST, path, Some(token)).json(body);
        let value = self.execute(request).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn put_json<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &B,
    ) -> Result<T, BackendError> {
        let request = self.request(Method::PUT, path, Some(token)).json(body);
        let value = self.execute(request).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn patch_json<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &B,
    ) -> Result<T, BackendError> {
        let request = self.request(Method::PATCH, path, Some(token)).json(body);
        let value = self.execute(request).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn delete(&self, path: &str, token: &str) -> Result<(), BackendError> {
        self.execute(self.request(Method::DELETE, path, Some(token)))
            .await?;
        Ok(())
    }

    /// Raw passthrough for the proxy routes: the backend's status and JSON
    /// body are returned untouched, success or not. Only transport and
    /// body-parse failures error.
    pub async fn forward(
        &self,
        method: Method,
        path: &str,
        token: &str,
        body: Option<&Value>,
    ) -> Result<(u16, Value), BackendError> {
        let mut request = self.request(method, path, Some(token));
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = parse_body(&response.text().await?)?;
        debug!(path, status, "forwarded to backend");
        Ok((status, body))
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let mut request = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Value, BackendError> {
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(BackendError::Api {
                status: status.as_u16(),
                message: extract_message(&text),
            });
        }
        parse_body(&text)
    }
}

/// Empty bodies (204s and friends) become `null` rather than a parse error.
fn parse_body(text: &str) -> Result<Value, BackendError> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(text)?)
}

/// Pulls `message` from an upstream error payload, falling back to a fixed
/// string when the body is empty or not the expected shape.
fn extract_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| DEFAULT_UPSTREAM_MESSAGE.to_string())
}
