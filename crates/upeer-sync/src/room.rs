use upeer_client::ClientError;
use upeer_client::services::ChatService;
use upeer_types::events::ChatEvent;
use upeer_types::models::Message;

use crate::list::{Keyed, SyncedList};

/// The message list of one group chat.
///
/// Both transports may feed it — the poller replaces wholesale, the socket
/// pushes single frames — so every insertion deduplicates by message id
/// before anything reaches a subscriber. Ordering is by timestamp with
/// insertion order breaking ties.
pub struct ChatRoom {
    chat: ChatService,
    group_id: i64,
    list: SyncedList<Message>,
}

impl ChatRoom {
    pub fn new(chat: ChatService, group_id: i64) -> Self {
        Self {
            chat,
            group_id,
            list: SyncedList::new(),
        }
    }

    pub fn group_id(&self) -> i64 {
        self.group_id
    }

    pub fn messages(&self) -> &SyncedList<Message> {
        &self.list
    }

    /// Authoritative re-fetch; the poller drives this.
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        let mut items = self.chat.messages(self.group_id).await?;
        items.sort_by_key(|m| m.timestamp);
        dedup_by_id(&mut items);
        self.list.replace(items);
        Ok(())
    }

    /// Send, then insert the server-canonical message. Nothing is shown
    /// until the server confirms.
    pub async fn send(&mut self, content: &str) -> Result<Message, ClientError> {
        let message = self.chat.send(self.group_id, content).await?;
        self.ingest(message.clone());
        Ok(message)
    }

    /// Fold a socket frame into the list.
    pub fn apply_event(&mut self, event: ChatEvent) {
        self.ingest(event.into());
    }

    fn ingest(&mut self, message: Message) {
        if self.list.contains(message.key()) {
            return;
        }
        // Insert after all messages with an equal or earlier timestamp:
        // ties resolve by arrival order.
        let snapshot = self.list.snapshot();
        let pos = snapshot.partition_point(|m| m.timestamp <= message.timestamp);
        if pos == snapshot.len() {
            self.list.append(message);
        } else {
            let mut items = snapshot;
            items.insert(pos, message);
            self.list.replace(items);
        }
    }
}

fn dedup_by_id(items: &mut Vec<Message>) {
    let mut seen = std::collections::HashSet::new();
    items.retain(|m| seen.insert(m.message_id));
}
