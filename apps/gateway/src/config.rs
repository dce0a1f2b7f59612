use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the job-board backend API.
    pub backend_api_url: String,
    /// Base URL of the auth upstream. Defaults to `backend_api_url`; kept
    /// separate so a split auth deployment can be pointed at without a
    /// code change.
    pub auth_api_url: String,
    pub s3_endpoint: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    pub resume_bucket: String,
    pub image_bucket: String,
    pub port: u16,
    /// Whether session cookies carry the `Secure` attribute. Off by default
    /// for local development; set true behind TLS.
    pub cookie_secure: bool,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let backend_api_url = trim_base_url(require_env("BACKEND_API_URL")?);
        let auth_api_url = std::env::var("AUTH_API_URL")
            .map(trim_base_url)
            .unwrap_or_else(|_| backend_api_url.clone());

        Ok(Config {
            backend_api_url,
            auth_api_url,
            s3_endpoint: trim_base_url(require_env("S3_ENDPOINT")?),
            aws_access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            resume_bucket: std::env::var("RESUME_BUCKET").unwrap_or_else(|_| "resumes".to_string()),
            image_bucket: std::env::var("IMAGE_BUCKET")
                .unwrap_or_else(|_| "profile-images".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            cookie_secure: std::env::var("COOKIE_SECURE")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn trim_base_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
