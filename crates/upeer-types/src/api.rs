use serde::{Deserialize, Serialize};

use crate::models::{PostType, User};

// -- JWT Claims --

/// Claims carried in the session token. Decoded client-side without a
/// server round-trip; the signing secret never leaves the backend.
///
/// Tokens issued at login carry no `name` claim, so sessions rehydrated
/// from a stored token have no display name until the next login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i64,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
    pub exp: usize,
}

// -- Auth --

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login and register both return the user object alongside the token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: String,
    pub email: String,
}

// -- Courses --

#[derive(Debug, Serialize, Deserialize)]
pub struct EnrollRequest {
    pub course_id: i64,
}

// -- Posts --

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub content: String,
    #[serde(rename = "type")]
    pub post_type: PostType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_id: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReportPostRequest {
    pub reason: String,
}

// -- Comments --

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateCommentRequest {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateCommentRequest {
    pub content: String,
}

// -- Groups --

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateGroupRequest {
    pub title: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InviteRequest {
    pub email: String,
}

/// Returned by the join-group-from-post and create-group-from-post
/// endpoints; `group_id` tells the caller which group to open.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinGroupResponse {
    #[serde(default)]
    pub group_id: Option<i64>,
    #[serde(default)]
    pub message: String,
}

// -- Chat --

#[derive(Debug, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub content: String,
}

// -- Generic bodies --

/// Success envelope for endpoints that return only a confirmation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub message: String,
}

/// Error envelope: every error response carries `{"error": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claims_tolerate_missing_name_and_admin_flag() {
        let json = r#"{"user_id": 7, "email": "a@b.com", "exp": 1700000000}"#;
        let claims: Claims = serde_json::from_str(json).unwrap();
        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.name, None);
        assert!(!claims.is_admin);
    }

    #[test]
    fn create_post_omits_absent_course() {
        let req = CreatePostRequest {
            content: "x".into(),
            post_type: PostType::Seeking,
            course_id: None,
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(!json.contains("course_id"));
        assert!(json.contains(r#""type":"seeking""#));
    }

    #[test]
    fn create_comment_omits_absent_parent() {
        let req = CreateCommentRequest {
            content: "x".into(),
            parent_id: None,
        };
        assert!(!serde_json::to_string(&req).unwrap().contains("parent_id"));
    }
}
