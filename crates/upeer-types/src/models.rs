use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub user_id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub course_id: i64,
    pub course_name: String,
}

/// Whether a post asks for help or offers it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostType {
    #[default]
    Seeking,
    Offering,
}

impl PostType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Seeking => "seeking",
            Self::Offering => "offering",
        }
    }
}

/// A help post. `course_id`/`course_name` are absent for campus-wide posts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub post_id: i64,
    pub author: String,
    pub content: String,
    #[serde(rename = "type", default)]
    pub post_type: PostType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_name: Option<String>,
    pub date_created: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub comment_count: u32,
}

/// One comment on a post. `parent_id`, when present, references another
/// comment on the same post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub comment_id: i64,
    pub post_id: i64,
    pub author: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
    pub date_created: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub group_id: i64,
    pub title: String,
    pub date_created: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupMember {
    pub user_id: i64,
    pub name: String,
    pub joined_at: DateTime<Utc>,
}

/// A group plus its member roster, as returned by the group detail endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupDetails {
    pub group: Group,
    #[serde(default)]
    pub members: Vec<GroupMember>,
}

/// A chat message. `user_id` is only present on frames coming over the
/// realtime socket; the REST history endpoint identifies senders by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub sender: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
}

/// Entry in the admin moderation queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportedPost {
    pub post_id: i64,
    pub content: String,
    pub user_id: i64,
    pub author: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_wire_shape() {
        let json = r#"{
            "post_id": 9,
            "author": "Alice",
            "content": "Need help with recursion",
            "type": "offering",
            "course_name": "CS 101",
            "course_id": 42,
            "date_created": "2024-03-01T10:00:00Z"
        }"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.post_type, PostType::Offering);
        assert_eq!(post.course_id, Some(42));
        assert_eq!(post.comment_count, 0);
        assert!(post.date_updated.is_none());
    }

    #[test]
    fn post_defaults_to_seeking_without_type() {
        // Rows created before the type column existed have no "type" field.
        let json = r#"{
            "post_id": 1,
            "author": "Bob",
            "content": "x",
            "date_created": "2024-03-01T10:00:00Z"
        }"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.post_type, PostType::Seeking);
        assert!(post.course_id.is_none());
    }

    #[test]
    fn campus_wide_post_serializes_without_course_fields() {
        let post = Post {
            post_id: 1,
            author: "Bob".into(),
            content: "x".into(),
            post_type: PostType::Seeking,
            course_id: None,
            course_name: None,
            date_created: Utc::now(),
            date_updated: None,
            comment_count: 0,
        };
        let json = serde_json::to_string(&post).unwrap();
        assert!(!json.contains("course_id"));
        assert!(!json.contains("date_updated"));
    }

    #[test]
    fn message_without_user_id() {
        let json = r#"{
            "message_id": 3,
            "content": "hi",
            "timestamp": "2024-03-01T10:00:00Z",
            "sender": "Alice"
        }"#;
        let msg: Message = serde_json::from_str(json).unwrap();
        assert_eq!(msg.user_id, None);
    }
}
