/// Object-storage upload helper for resumes, profile images, and company
/// logos.
///
/// Contract: a successful upload yields the object's public URL; any
/// failure yields `None`, and callers must abort the dependent submission.
use aws_sdk_s3::{primitives::ByteStream, Client as S3Client};
use bytes::Bytes;
use chrono::Utc;
use tracing::{error, info};

#[derive(Clone)]
pub struct Storage {
    client: S3Client,
    endpoint: String,
    resume_bucket: String,
    image_bucket: String,
}

impl Storage {
    pub fn new(
        client: S3Client,
        endpoint: &str,
        resume_bucket: &str,
        image_bucket: &str,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            resume_bucket: resume_bucket.to_string(),
            image_bucket: image_bucket.to_string(),
        }
    }

    pub async fn upload_resume(&self, owner: &str, filename: &str, bytes: Bytes) -> Option<String> {
        self.upload(&self.resume_bucket, owner, filename, bytes, "application/pdf")
            .await
    }

    pub async fn upload_image(
        &self,
        owner: &str,
        filename: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> Option<String> {
        self.upload(&self.image_bucket, owner, filename, bytes, content_type)
            .await
    }

    /// Uploads with overwrite-allowed semantics (a plain S3 PUT) and returns
    /// the public URL, or `None` on any failure.
    async fn upload(
        &self,
        bucket: &str,
        owner: &str,
        filename: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> Option<String> {
        let key = object_key(owner, filename, Utc::now().timestamp_millis());

        match self
            .client
            .put_object()
            .bucket(bucket)
            .key(&key)
            .body(ByteStream::from(bytes))
            .content_type(content_type)
            .send()
            .await
        {
            Ok(_) => {
                let url = self.public_url(bucket, &key);
                info!(bucket, key, "uploaded object");
                Some(url)
            }
            Err(e) => {
                error!(bucket, key, "upload failed: {e}");
                None
            }
        }
    }

    fn public_url(&self, bucket: &str, key: &str) -> String {
        format!("{}/{}/{}", self.endpoint, bucket, key)
    }
}

/// Collision-resistant object key: owner id + millisecond timestamp +
/// original extension.
fn object_key(owner: &str, filename: &str, millis: i64) -> String {
    let ext = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
        .unwrap_or("bin");
    format!("{owner}-{millis}.{ext}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_key_uses_owner_timestamp_and_extension() {
        assert_eq!(
            object_key("u1", "resume.pdf", 1_700_000_000_000),
            "u1-1700000000000.pdf"
        );
    }

    #[test]
    fn test_object_key_keeps_last_extension_only() {
        assert_eq!(
            object_key("u1", "cv.final.pdf", 1),
            "u1-1.pdf"
        );
    }

    #[test]
    fn test_object_key_defaults_extension_when_missing() {
        assert_eq!(object_key("u1", "resume", 1), "u1-1.bin");
        assert_eq!(object_key("u1", "resume.", 1), "u1-1.bin");
    }

    #[test]
    fn test_same_owner_different_timestamps_never_collide() {
        assert_ne!(
            object_key("u1", "resume.pdf", 1),
            object_key("u1", "resume.pdf", 2)
        );
    }
}
