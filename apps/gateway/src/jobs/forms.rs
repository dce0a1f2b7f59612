use axum::extract::Multipart;
use bytes::Bytes;

use crate::errors::AppError;
use crate::forms::{check_email, check_min_len, FieldErrors};

pub const MAX_RESUME_BYTES: usize = 10 * 1024 * 1024;

/// The application form as read from the multipart submission. Unknown
/// parts are ignored.
#[derive(Debug, Default)]
pub struct ApplicationForm {
    pub full_name: String,
    pub email: String,
    pub cover_letter: String,
    pub resume: Option<ResumeFile>,
}

#[derive(Debug)]
pub struct ResumeFile {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl ApplicationForm {
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = ApplicationForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| FieldErrors::single("resume", format!("Invalid form data: {e}")))?
        {
            let name = field.name().map(str::to_string);
            match name.as_deref() {
                Some("fullName") => form.full_name = field.text().await.unwrap_or_default(),
                Some("email") => form.email = field.text().await.unwrap_or_default(),
                Some("coverLetter") => form.cover_letter = field.text().await.unwrap_or_default(),
                Some("resume") => {
                    let filename = field.file_name().unwrap_or("resume").to_string();
                    let content_type = field.content_type().map(str::to_string);
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|_| FieldErrors::single("resume", "Failed to read resume file"))?;
                    form.resume = Some(ResumeFile {
                        filename,
                        content_type,
                        bytes,
                    });
                }
                _ => {}
            }
        }
        Ok(form)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        let mut errors = FieldErrors::new();
        check_min_len(&mut errors, "fullName", &self.full_name, 2, "Full name");
        check_email(&mut errors, "email", &self.email);
        check_min_len(
            &mut errors,
            "coverLetter",
            &self.cover_letter,
            10,
            "Cover letter",
        );
        match &self.resume {
            None => errors.push("resume", "Please upload your resume"),
            Some(file) => {
                if !is_pdf(file) {
                    errors.push("resume", "Please upload a PDF file");
                } else if file.bytes.len() > MAX_RESUME_BYTES {
                    errors.push("resume", "File size should be less than 10MB");
                }
            }
        }
        errors.into_result()
    }
}

fn is_pdf(file: &ResumeFile) -> bool {
    match file.content_type.as_deref() {
        Some(ct) => ct == "application/pdf",
        // Some clients omit the part content type; fall back on the name.
        None => file.filename.to_lowercase().ends_with(".pdf"),
    }
}
