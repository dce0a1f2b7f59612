use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The two account roles. Everything role-gated keys off this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserType {
    #[serde(rename = "jobseeker")]
    JobSeeker,
    #[serde(rename = "employer")]
    Employer,
}

/// The user record carried in the session cookie and returned by
/// `/users/profile`. Unknown backend fields are preserved through `extra`
/// so the stored object round-trips unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(rename = "userType")]
    pub user_type: UserType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(rename = "profileImage", default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Backend wire shape for a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: SessionUser,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_type_wire_names() {
        assert_eq!(
            serde_json::to_string(&UserType::JobSeeker).unwrap(),
            "\"jobseeker\""
        );
        assert_eq!(
            serde_json::to_string(&UserType::Employer).unwrap(),
            "\"employer\""
        );
    }

    #[test]
    fn test_session_user_preserves_unknown_fields() {
        let raw = serde_json::json!({
            "id": "u1",
            "name": "Dana",
            "email": "dana@example.com",
            "userType": "jobseeker",
            "title": "Backend Engineer",
            "memberSince": "2023-01-01"
        });
        let user: SessionUser = serde_json::from_value(raw.clone()).unwrap();
        let back = serde_json::to_value(&user).unwrap();
        assert_eq!(back, raw);
    }
}
