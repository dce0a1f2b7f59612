use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::auth::session::{self, Session};
use crate::errors::AppError;
use crate::forms::FieldErrors;
use crate::jobs::forms::ApplicationForm;
use crate::models::application::NewApplication;
use crate::models::job::Job;
use crate::state::AppState;

/// GET /jobs
///
/// The backend read is public; the token rides along when a session exists
/// so the backend can personalize the listing.
pub async fn list_jobs(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Json<Vec<Job>>, AppError> {
    let token = session::token_from_jar(&jar);
    let jobs = state.backend.get_json("/jobs", token.as_deref()).await?;
    Ok(Json(jobs))
}

/// GET /jobs/:id
pub async fn job_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Job>, AppError> {
    let job = state.backend.get_json(&format!("/jobs/{id}"), None).await?;
    Ok(Json(job))
}

/// The apply form needs only enough of the job to label the page.
#[derive(Debug, Serialize)]
pub struct ApplyFormView {
    pub id: String,
    pub title: String,
    pub company: String,
}

/// GET /jobs/:id/apply
pub async fn apply_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApplyFormView>, AppError> {
    let job: Job = state.backend.get_json(&format!("/jobs/{id}"), None).await?;
    Ok(Json(ApplyFormView {
        id: job.id,
        title: job.title,
        company: job.company,
    }))
}

/// POST /jobs/:id/apply (multipart)
///
/// Pipeline: validate → upload resume → create application. The two
/// network steps are strictly sequenced; a failed upload aborts the
/// submission before the backend is ever contacted.
pub async fn submit_application(
    State(state): State<AppState>,
    session: Session,
    Path(job_id): Path<String>,
    multipart: Multipart,
) -> Result<Json<Value>, AppError> {
    let form = ApplicationForm::from_multipart(multipart).await?;
    form.validate()?;

    let owner = session.user_id()?.to_string();
    // validate() guarantees the file is present.
    let resume = form
        .resume
        .ok_or_else(|| anyhow::anyhow!("resume missing after validation"))?;

    let resume_url = state
        .storage
        .upload_resume(&owner, &resume.filename, resume.bytes)
        .await
        .ok_or_else(|| {
            FieldErrors::single("resume", "Failed to upload resume. Please try again.")
        })?;

    let payload = NewApplication {
        job_id: job_id.clone(),
        full_name: form.full_name,
        email: form.email,
        cover_letter: form.cover_letter,
        resume_url,
    };
    let created: Value = state
        .backend
        .post_json("/applications", &session.token, &payload)
        .await?;

    info!(job = %job_id, applicant = %owner, "application submitted");
    Ok(Json(created))
}
