use upeer_types::api::{ApiMessage, CreatePostRequest, ReportPostRequest, UpdatePostRequest};
use upeer_types::models::{Post, PostType, ReportedPost};

use crate::error::ClientError;
use crate::gateway::ApiClient;

/// Board filters. `None` means "no filter" and must not be serialized at
/// all — an empty `course_id=` would read as "filter by empty value".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub course_id: Option<i64>,
    pub post_type: Option<PostType>,
}

#[derive(Clone)]
pub struct PostService {
    api: ApiClient,
}

impl PostService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self, filter: &PostFilter) -> Result<Vec<Post>, ClientError> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(course_id) = filter.course_id {
            query.push(("course_id", course_id.to_string()));
        }
        if let Some(post_type) = filter.post_type {
            query.push(("type", post_type.as_str().to_string()));
        }
        self.api.get_query("posts/", &query).await
    }

    /// Returns the server-canonical post, with its assigned id.
    pub async fn create(
        &self,
        content: &str,
        course_id: Option<i64>,
        post_type: PostType,
    ) -> Result<Post, ClientError> {
        if content.trim().is_empty() {
            return Err(ClientError::Precondition(
                "post content must not be empty".into(),
            ));
        }
        let req = CreatePostRequest {
            content: content.to_string(),
            post_type,
            course_id,
        };
        self.api.post("posts/", &req).await
    }

    pub async fn update(&self, post_id: i64, content: &str) -> Result<Post, ClientError> {
        let req = UpdatePostRequest {
            content: content.to_string(),
        };
        self.api.put(&format!("posts/{post_id}/"), &req).await
    }

    pub async fn delete(&self, post_id: i64) -> Result<(), ClientError> {
        self.api.delete(&format!("posts/{post_id}/")).await
    }

    pub async fn report(&self, post_id: i64, reason: &str) -> Result<(), ClientError> {
        let req = ReportPostRequest {
            reason: reason.to_string(),
        };
        let _: ApiMessage = self
            .api
            .post(&format!("posts/{post_id}/report/"), &req)
            .await?;
        Ok(())
    }

    /// Admin-only moderation queue.
    pub async fn reported(&self) -> Result<Vec<ReportedPost>, ClientError> {
        self.api.get("posts/reported/").await
    }
}
