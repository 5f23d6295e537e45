use upeer_types::api::SendMessageRequest;
use upeer_types::models::Message;

use crate::error::ClientError;
use crate::gateway::ApiClient;

#[derive(Clone)]
pub struct ChatService {
    api: ApiClient,
}

impl ChatService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Full message history for a group.
    pub async fn messages(&self, group_id: i64) -> Result<Vec<Message>, ClientError> {
        self.api.get(&format!("chat/{group_id}/messages/")).await
    }

    /// Returns the stored message with its server-assigned id, for
    /// canonical insertion into the local list.
    pub async fn send(&self, group_id: i64, content: &str) -> Result<Message, ClientError> {
        if content.trim().is_empty() {
            return Err(ClientError::Precondition(
                "message content must not be empty".into(),
            ));
        }
        let req = SendMessageRequest {
            content: content.to_string(),
        };
        self.api
            .post(&format!("chat/{group_id}/messages/"), &req)
            .await
    }
}
