use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Message;

/// Frame pushed by the chat socket when a message lands in the group.
/// Same shape the REST history endpoint returns, so a frame can be folded
/// straight into a message list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatEvent {
    pub message_id: i64,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub sender: String,
    pub user_id: i64,
}

impl From<ChatEvent> for Message {
    fn from(ev: ChatEvent) -> Self {
        Message {
            message_id: ev.message_id,
            content: ev.content,
            timestamp: ev.timestamp,
            sender: ev.sender,
            user_id: Some(ev.user_id),
        }
    }
}

/// Envelope sent from client to server over the chat socket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCommand {
    pub message: String,
}
