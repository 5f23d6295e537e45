use upeer_types::api::{ApiMessage, CreateGroupRequest, InviteRequest, JoinGroupResponse};
use upeer_types::models::{Group, GroupDetails};

use crate::error::ClientError;
use crate::gateway::ApiClient;

#[derive(Clone)]
pub struct GroupService {
    api: ApiClient,
}

impl GroupService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// The current user's groups, most recent first.
    pub async fn mine(&self) -> Result<Vec<Group>, ClientError> {
        self.api.get("groups/").await
    }

    pub async fn create(&self, title: &str) -> Result<Group, ClientError> {
        if title.trim().is_empty() {
            return Err(ClientError::Precondition(
                "a group title is required".into(),
            ));
        }
        let req = CreateGroupRequest {
            title: title.to_string(),
        };
        self.api.post("groups/", &req).await
    }

    pub async fn details(&self, group_id: i64) -> Result<GroupDetails, ClientError> {
        self.api.get(&format!("groups/{group_id}/")).await
    }

    pub async fn join(&self, group_id: i64) -> Result<(), ClientError> {
        let _: ApiMessage = self
            .api
            .post_empty(&format!("groups/{group_id}/join/"))
            .await?;
        Ok(())
    }

    pub async fn leave(&self, group_id: i64) -> Result<(), ClientError> {
        self.api.delete(&format!("groups/{group_id}/leave/")).await
    }

    /// Invite another student by email.
    pub async fn invite(&self, group_id: i64, email: &str) -> Result<(), ClientError> {
        let req = InviteRequest {
            email: email.to_string(),
        };
        let _: ApiMessage = self
            .api
            .post(&format!("groups/{group_id}/invite/"), &req)
            .await?;
        Ok(())
    }

    /// Join (creating if needed) the study group attached to a help post.
    pub async fn join_from_post(&self, post_id: i64) -> Result<JoinGroupResponse, ClientError> {
        self.api
            .post_empty(&format!("posts/{post_id}/join-group/"))
            .await
    }

    /// Spin a titled study group off a help post.
    pub async fn create_from_post(
        &self,
        post_id: i64,
        title: &str,
    ) -> Result<JoinGroupResponse, ClientError> {
        let req = CreateGroupRequest {
            title: title.to_string(),
        };
        self.api
            .post(&format!("posts/{post_id}/create-group/"), &req)
            .await
    }
}
