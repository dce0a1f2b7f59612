pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, patch, post},
    Json, Router,
};
use serde_json::{json, Value};

use crate::api;
use crate::auth::{self, gate};
use crate::employer;
use crate::jobs;
use crate::seeker;
use crate::state::AppState;

/// Multipart bodies carry a resume of up to 10MB plus form fields.
const MAX_BODY_BYTES: usize = 12 * 1024 * 1024;

/// GET / — public landing page. Exists mainly so the gate has a route to
/// bounce authenticated visitors away from.
async fn home() -> Json<Value> {
    Json(json!({ "page": "home" }))
}

pub fn build_router(state: AppState) -> Router {
    // Session and proxy endpoints live under /api, outside the navigation
    // gate. Proxy auth is the bearer header, not cookies.
    let api = Router::new()
        .route("/api/auth/login", post(auth::handlers::login))
        .route("/api/auth/logout", post(auth::handlers::logout))
        .route("/api/auth/register", post(auth::handlers::register))
        .route(
            "/api/applications",
            get(api::handlers::list_applications).post(api::handlers::create_application),
        );

    let pages = Router::new()
        .route("/", get(home))
        .route("/auth/login", get(auth::handlers::login_page))
        .route("/auth/register", get(auth::handlers::register_page))
        .route("/jobs", get(jobs::handlers::list_jobs))
        .route("/jobs/:id", get(jobs::handlers::job_detail))
        .route(
            "/jobs/:id/apply",
            get(jobs::handlers::apply_form).post(jobs::handlers::submit_application),
        )
        .route("/dashboard", get(seeker::handlers::dashboard))
        .route("/applications", get(seeker::handlers::applications))
        .route(
            "/profile",
            get(seeker::handlers::profile).put(seeker::handlers::update_profile),
        )
        .route("/profile/image", post(seeker::handlers::upload_profile_image))
        .route("/employer-dashboard", get(employer::handlers::dashboard))
        .route(
            "/employer/jobs",
            get(employer::handlers::list_jobs).post(employer::handlers::create_job),
        )
        .route(
            "/employer/jobs/:id",
            patch(employer::handlers::update_job).delete(employer::handlers::delete_job),
        )
        .route("/employer/jobs/:id/edit", get(employer::handlers::edit_job))
        .route(
            "/employer/jobs/:id/applications",
            get(employer::handlers::job_applications),
        )
        .route(
            "/employer/applications/:id",
            patch(employer::handlers::update_application_status),
        )
        .route(
            "/employer/profile",
            get(employer::handlers::profile).put(employer::handlers::update_profile),
        )
        .route(
            "/employer/profile/logo",
            post(employer::handlers::upload_company_logo),
        )
        .layer(middleware::from_fn(gate::auth_gate));

    Router::new()
        .route("/health", get(health::health_handler))
        .merge(api)
        .merge(pages)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}
