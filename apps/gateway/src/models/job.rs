use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobType {
    FullTime,
    PartTime,
    Contract,
    Internship,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    #[default]
    Active,
    Closed,
}

/// A job listing as served by the backend. Owned there; displayed and
/// edited here. Listing payloads omit some fields the detail payload
/// carries, hence the defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(rename = "type")]
    pub job_type: JobType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    pub description: String,
    pub requirements: String,
    #[serde(default)]
    pub experience: Option<String>,
    #[serde(default)]
    pub status: JobStatus,
    #[serde(default)]
    pub applicants_count: u32,
    pub created_at: String,
}
