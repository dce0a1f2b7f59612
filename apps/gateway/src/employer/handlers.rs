use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::info;

use crate::auth::session::{Session, SEEKER_HOME};
use crate::employer::forms::{
    validate_employer_profile, validate_job, validate_status_update, EmployerProfileForm, JobForm,
    StatusUpdateForm,
};
use crate::errors::AppError;
use crate::forms::FieldErrors;
use crate::models::application::EmployerApplication;
use crate::models::job::{Job, JobStatus};
use crate::models::user::{SessionUser, UserType};
use crate::seeker::handlers::read_image_field;
use crate::state::AppState;

#[derive(Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStats {
    pub total_jobs: usize,
    pub active_jobs: usize,
    pub total_applicants: u32,
}

pub fn job_stats(jobs: &[Job]) -> JobStats {
    JobStats {
        total_jobs: jobs.len(),
        active_jobs: jobs
            .iter()
            .filter(|j| j.status == JobStatus::Active)
            .count(),
        total_applicants: jobs.iter().map(|j| j.applicants_count).sum(),
    }
}

#[derive(Debug, Serialize)]
pub struct EmployerDashboardView {
    pub user: SessionUser,
    pub jobs: Vec<Job>,
    pub stats: JobStats,
}

/// GET /employer-dashboard
pub async fn dashboard(State(state): State<AppState>, session: Session) -> Result<Response, AppError> {
    let user: SessionUser = state
        .backend
        .get_json("/users/profile", Some(&session.token))
        .await?;
    if user.user_type == UserType::JobSeeker {
        return Ok(Redirect::to(SEEKER_HOME).into_response());
    }

    let jobs: Vec<Job> = state
        .backend
        .get_json("/employer/jobs", Some(&session.token))
        .await?;
    let stats = job_stats(&jobs);

    Ok(Json(EmployerDashboardView { user, jobs, stats }).into_response())
}

/// GET /employer/jobs
pub async fn list_jobs(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<Vec<Job>>, AppError> {
    let jobs = state
        .backend
        .get_json("/employer/jobs", Some(&session.token))
        .await?;
    Ok(Json(jobs))
}

/// POST /employer/jobs
pub async fn create_job(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<JobForm>,
) -> Result<Json<Value>, AppError> {
    validate_job(&form, false)?;
    let created: Value = state
        .backend
        .post_json("/employer/jobs", &session.token, &form)
        .await?;
    info!("job posted");
    Ok(Json(created))
}

/// GET /employer/jobs/:id/edit
pub async fn edit_job(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Json<Job>, AppError> {
    let job = state
        .backend
        .get_json(&format!("/jobs/{id}"), Some(&session.token))
        .await?;
    Ok(Json(job))
}

/// PATCH /employer/jobs/:id
pub async fn update_job(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    Json(form): Json<JobForm>,
) -> Result<Json<Value>, AppError> {
    validate_job(&form, true)?;
    let updated = state
        .backend
        .patch_json(&format!("/jobs/{id}"), &session.token, &form)
        .await?;
    Ok(Json(updated))
}

/// DELETE /employer/jobs/:id
pub async fn delete_job(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state
        .backend
        .delete(&format!("/employer/jobs/{id}"), &session.token)
        .await?;
    info!(job = %id, "job removed");
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Serialize)]
pub struct JobApplicationsView {
    pub job: Job,
    pub applications: Vec<EmployerApplication>,
}

/// GET /employer/jobs/:id/applications
pub async fn job_applications(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Json<JobApplicationsView>, AppError> {
    let job: Job = state
        .backend
        .get_json(&format!("/jobs/{id}"), Some(&session.token))
        .await?;
    let applications: Vec<EmployerApplication> = state
        .backend
        .get_json(
            &format!("/employer/jobs/{id}/applications"),
            Some(&session.token),
        )
        .await?;
    Ok(Json(JobApplicationsView { job, applications }))
}

/// PATCH /employer/applications/:id
///
/// Initiates a pending → shortlisted/rejected transition; the backend
/// commits it (or refuses) and its verdict is relayed.
pub async fn update_application_status(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    Json(form): Json<StatusUpdateForm>,
) -> Result<Json<Value>, AppError> {
    validate_status_update(&form)?;
    let updated = state
        .backend
        .patch_json(&format!("/applications/{id}"), &session.token, &form)
        .await?;
    info!(application = %id, status = %form.status, "application status updated");
    Ok(Json(updated))
}

/// GET /employer/profile
pub async fn profile(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<Value>, AppError> {
    let profile = state
        .backend
        .get_json("/employer/profile", Some(&session.token))
        .await?;
    Ok(Json(profile))
}

/// PUT /employer/profile
pub async fn update_profile(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<EmployerProfileForm>,
) -> Result<Json<Value>, AppError> {
    validate_employer_profile(&form)?;
    let updated = state
        .backend
        .put_json("/employer/profile", &session.token, &form)
        .await?;
    Ok(Json(updated))
}

/// POST /employer/profile/logo (multipart, field `companyLogo`)
pub async fn upload_company_logo(
    State(state): State<AppState>,
    session: Session,
    multipart: Multipart,
) -> Result<Json<Value>, AppError> {
    let logo = read_image_field(multipart, "companyLogo").await?;
    let owner = session.user_id()?.to_string();

    let logo_url = state
        .storage
        .upload_image(&owner, &logo.filename, logo.bytes, &logo.content_type)
        .await
        .ok_or_else(|| {
            FieldErrors::single("companyLogo", "Failed to upload logo. Please try again.")
        })?;

    let _: Value = state
        .backend
        .post_json(
            "/employer/profile/logo",
            &session.token,
            &json!({ "logoUrl": logo_url }),
        )
        .await?;

    Ok(Json(json!({ "logoUrl": logo_url })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::JobType;

    fn job(status: JobStatus, applicants: u32) -> Job {
        Job {
            id: "j1".to_string(),
            title: "Rust Engineer".to_string(),
            company: "Acme".to_string(),
            location: "Remote".to_string(),
            job_type: JobType::FullTime,
            salary: None,
            description: "Build services".to_string(),
            requirements: "Rust".to_string(),
            experience: None,
            status,
            applicants_count: applicants,
            created_at: "2024-05-01".to_string(),
        }
    }

    #[test]
    fn test_job_stats_empty() {
        assert_eq!(job_stats(&[]), JobStats::default());
    }

    #[test]
    fn test_job_stats_counts_active_and_applicants() {
        let jobs = vec![
            job(JobStatus::Active, 3),
            job(JobStatus::Active, 0),
            job(JobStatus::Closed, 7),
        ];
        let stats = job_stats(&jobs);
        assert_eq!(stats.total_jobs, 3);
        assert_eq!(stats.active_jobs, 2);
        assert_eq!(stats.total_applicants, 10);
    }
}
