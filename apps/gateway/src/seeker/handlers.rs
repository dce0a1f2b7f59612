use axum::{
    extract::{Multipart, State},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};

use crate::auth::session::{Session, EMPLOYER_HOME};
use crate::errors::AppError;
use crate::forms::FieldErrors;
use crate::models::application::{ApplicationStatus, SeekerApplication};
use crate::models::user::{SessionUser, UserType};
use crate::seeker::forms::{validate_profile, SeekerProfileForm};
use crate::state::AppState;

#[derive(Debug, Default, PartialEq, Eq, Serialize)]
pub struct ApplicationStats {
    pub total: usize,
    pub pending: usize,
    pub shortlisted: usize,
    pub rejected: usize,
}

pub fn application_stats(applications: &[SeekerApplication]) -> ApplicationStats {
    let mut stats = ApplicationStats {
        total: applications.len(),
        ..Default::default()
    };
    for application in applications {
        match application.status {
            ApplicationStatus::Pending => stats.pending += 1,
            ApplicationStatus::Shortlisted => stats.shortlisted += 1,
            ApplicationStatus::Rejected => stats.rejected += 1,
        }
    }
    stats
}

#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub user: SessionUser,
    pub applications: Vec<SeekerApplication>,
    pub stats: ApplicationStats,
}

/// GET /dashboard
///
/// Re-checks the role against the live profile: a stale cookie can pass the
/// gate, the backend record cannot.
pub async fn dashboard(State(state): State<AppState>, session: Session) -> Result<Response, AppError> {
    let user: SessionUser = state
        .backend
        .get_json("/users/profile", Some(&session.token))
        .await?;
    if user.user_type == UserType::Employer {
        return Ok(Redirect::to(EMPLOYER_HOME).into_response());
    }

    let applications: Vec<SeekerApplication> = state
        .backend
        .get_json("/applications", Some(&session.token))
        .await?;
    let stats = application_stats(&applications);

    Ok(Json(DashboardView {
        user,
        applications,
        stats,
    })
    .into_response())
}

/// GET /applications
pub async fn applications(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<Vec<SeekerApplication>>, AppError> {
    let applications = state
        .backend
        .get_json("/applications", Some(&session.token))
        .await?;
    Ok(Json(applications))
}

/// GET /profile
pub async fn profile(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<Value>, AppError> {
    let profile = state
        .backend
        .get_json("/profile", Some(&session.token))
        .await?;
    Ok(Json(profile))
}

/// PUT /profile
pub async fn update_profile(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<SeekerProfileForm>,
) -> Result<Json<Value>, AppError> {
    validate_profile(&form)?;
    let updated = state
        .backend
        .put_json("/profile", &session.token, &form)
        .await?;
    Ok(Json(updated))
}

/// POST /profile/image (multipart, field `image`)
///
/// Uploads to object storage, then records the resulting URL on the
/// backend profile. An upload failure aborts before the backend call.
pub async fn upload_profile_image(
    State(state): State<AppState>,
    session: Session,
    multipart: Multipart,
) -> Result<Json<Value>, AppError> {
    let image = read_image_field(multipart, "image").await?;
    let owner = session.user_id()?.to_string();

    let image_url = state
        .storage
        .upload_image(&owner, &image.filename, image.bytes, &image.content_type)
        .await
        .ok_or_else(|| FieldErrors::single("image", "Failed to upload image. Please try again."))?;

    let _: Value = state
        .backend
        .post_json(
            "/profile/image",
            &session.token,
            &json!({ "imageUrl": image_url }),
        )
        .await?;

    Ok(Json(json!({ "imageUrl": image_url })))
}

pub struct ImageUpload {
    pub filename: String,
    pub content_type: String,
    pub bytes: bytes::Bytes,
}

/// Reads a single image part out of a multipart body. Non-image content is
/// rejected with a field error.
pub async fn read_image_field(
    mut multipart: Multipart,
    field_name: &'static str,
) -> Result<ImageUpload, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| FieldErrors::single(field_name, format!("Invalid form data: {e}")))?
    {
        if field.name() != Some(field_name) {
            continue;
        }
        let filename = field.file_name().unwrap_or("image").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        if !content_type.starts_with("image/") {
            return Err(FieldErrors::single(field_name, "Please upload an image file"));
        }
        let bytes = field
            .bytes()
            .await
            .map_err(|_| FieldErrors::single(field_name, "Failed to read image file"))?;
        return Ok(ImageUpload {
            filename,
            content_type,
            bytes,
        });
    }
    Err(FieldErrors::single(field_name, "Please choose a file"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::application::JobRef;

    fn application(status: ApplicationStatus) -> SeekerApplication {
        SeekerApplication {
            id: "a1".to_string(),
            job: JobRef {
                id: "j1".to_string(),
                title: "Rust Engineer".to_string(),
                company: "Acme".to_string(),
                location: None,
                job_type: None,
            },
            status,
            cover_letter: None,
            resume: None,
            applied_date: "2024-05-01".to_string(),
        }
    }

    #[test]
    fn test_stats_empty() {
        assert_eq!(application_stats(&[]), ApplicationStats::default());
    }

    #[test]
    fn test_stats_counts_by_status() {
        let applications = vec![
            application(ApplicationStatus::Pending),
            application(ApplicationStatus::Pending),
            application(ApplicationStatus::Shortlisted),
            application(ApplicationStatus::Rejected),
        ];
        let stats = application_stats(&applications);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.pending, 2);
        assert_eq!(stats.shortlisted, 1);
        assert_eq!(stats.rejected, 1);
    }
}
