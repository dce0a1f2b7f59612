use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::{json, Value};
use tracing::info;

use crate::auth::forms::{validate_login, validate_register, LoginForm, RegisterForm};
use crate::auth::session;
use crate::errors::AppError;
use crate::state::AppState;

/// POST /api/auth/login
///
/// Proxies credentials to the auth upstream; on success sets the session
/// cookie pair and relays the backend body so the client sees the same
/// `{access_token, user}` payload it would get from the backend directly.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(form): Json<LoginForm>,
) -> Result<impl IntoResponse, AppError> {
    validate_login(&form)?;

    let response = state
        .backend
        .login(&form)
        .await
        .map_err(AppError::upstream)?;

    info!(user = %response.user.id, "login succeeded");

    let jar = session::with_login(
        jar,
        &response.access_token,
        &response.user,
        state.config.cookie_secure,
    )
    .map_err(|e| AppError::Internal(e.into()))?;

    let body = serde_json::to_value(&response).map_err(|e| AppError::Internal(e.into()))?;
    Ok((jar, Json(body)))
}

/// POST /api/auth/logout
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    (session::without_login(jar), StatusCode::NO_CONTENT)
}

/// POST /api/auth/register
///
/// Validates and forwards. `confirmPassword` is checked here and never
/// reaches the backend. No cookies are set; the client logs in afterwards.
pub async fn register(
    State(state): State<AppState>,
    Json(form): Json<RegisterForm>,
) -> Result<Json<Value>, AppError> {
    validate_register(&form)?;

    let payload = json!({
        "name": form.name,
        "email": form.email,
        "password": form.password,
        "userType": form.user_type,
    });
    let created: Value = state
        .backend
        .register(&payload)
        .await
        .map_err(AppError::upstream)?;

    Ok(Json(created))
}

/// GET /auth/login — public form page. Carries no data; the route exists so
/// the gate can bounce authenticated visitors to their role home.
pub async fn login_page() -> Json<Value> {
    Json(json!({ "page": "login" }))
}

/// GET /auth/register
pub async fn register_page() -> Json<Value> {
    Json(json!({ "page": "register" }))
}
