use upeer_types::api::{CreateCommentRequest, UpdateCommentRequest};
use upeer_types::models::Comment;

use crate::error::ClientError;
use crate::gateway::ApiClient;

#[derive(Clone)]
pub struct CommentService {
    api: ApiClient,
}

impl CommentService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn for_post(&self, post_id: i64) -> Result<Vec<Comment>, ClientError> {
        require_id(post_id, "a post id is required to fetch comments")?;
        self.api.get(&format!("posts/{post_id}/comments/")).await
    }

    /// Returns the server-canonical comment with its assigned id.
    pub async fn create(
        &self,
        post_id: i64,
        content: &str,
        parent_id: Option<i64>,
    ) -> Result<Comment, ClientError> {
        require_id(post_id, "a post id is required to create a comment")?;
        if content.trim().is_empty() {
            return Err(ClientError::Precondition(
                "comment content must not be empty".into(),
            ));
        }
        let req = CreateCommentRequest {
            content: content.to_string(),
            parent_id,
        };
        self.api
            .post(&format!("posts/{post_id}/comments/"), &req)
            .await
    }

    pub async fn update(&self, comment_id: i64, content: &str) -> Result<Comment, ClientError> {
        require_id(comment_id, "a comment id is required to update a comment")?;
        let req = UpdateCommentRequest {
            content: content.to_string(),
        };
        self.api.put(&format!("comments/{comment_id}/"), &req).await
    }

    pub async fn delete(&self, comment_id: i64) -> Result<(), ClientError> {
        require_id(comment_id, "a comment id is required to delete a comment")?;
        self.api.delete(&format!("comments/{comment_id}/")).await
    }
}

/// Fails fast client-side instead of issuing a malformed request.
fn require_id(id: i64, message: &str) -> Result<(), ClientError> {
    if id <= 0 {
        return Err(ClientError::Precondition(message.to_string()));
    }
    Ok(())
}
