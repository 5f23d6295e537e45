use tokio::sync::watch;

use upeer_types::models::{Comment, Course, Group, GroupMember, Message, Post};

/// Items that can be matched by server-assigned id inside a [`SyncedList`].
pub trait Keyed {
    fn key(&self) -> i64;
}

impl Keyed for Post {
    fn key(&self) -> i64 {
        self.post_id
    }
}

impl Keyed for Comment {
    fn key(&self) -> i64 {
        self.comment_id
    }
}

impl Keyed for Group {
    fn key(&self) -> i64 {
        self.group_id
    }
}

impl Keyed for GroupMember {
    fn key(&self) -> i64 {
        self.user_id
    }
}

impl Keyed for Message {
    fn key(&self) -> i64 {
        self.message_id
    }
}

impl Keyed for Course {
    fn key(&self) -> i64 {
        self.course_id
    }
}

/// An id-keyed list living inside a watch channel: every mutation
/// publishes a fresh snapshot to subscribers, replacing implicit reactive
/// re-render with explicit state-change notification.
///
/// Mutations happen only after a successful server response, so a failed
/// request leaves the contents bit-for-bit intact by construction.
pub struct SyncedList<T> {
    tx: watch::Sender<Vec<T>>,
}

impl<T: Keyed + Clone> SyncedList<T> {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(Vec::new());
        Self { tx }
    }

    /// Observe every change as a full snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Vec<T>> {
        self.tx.subscribe()
    }

    pub fn snapshot(&self) -> Vec<T> {
        self.tx.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.tx.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tx.borrow().is_empty()
    }

    pub fn get(&self, key: i64) -> Option<T> {
        self.tx.borrow().iter().find(|i| i.key() == key).cloned()
    }

    pub fn contains(&self, key: i64) -> bool {
        self.tx.borrow().iter().any(|i| i.key() == key)
    }

    /// Wholesale replacement with the authoritative server list.
    pub fn replace(&self, items: Vec<T>) {
        self.tx.send_replace(items);
    }

    pub fn prepend(&self, item: T) {
        self.tx.send_modify(|items| items.insert(0, item));
    }

    pub fn append(&self, item: T) {
        self.tx.send_modify(|items| items.push(item));
    }

    /// Replace the item with the same key by the server-canonical one.
    /// No merge of stale and fresh fields. Returns false if absent.
    pub fn update(&self, item: T) -> bool {
        let mut found = false;
        self.tx.send_if_modified(|items| {
            if let Some(slot) = items.iter_mut().find(|i| i.key() == item.key()) {
                *slot = item;
                found = true;
            }
            found
        });
        found
    }

    pub fn remove(&self, key: i64) -> bool {
        let mut removed = false;
        self.tx.send_if_modified(|items| {
            let before = items.len();
            items.retain(|i| i.key() != key);
            removed = items.len() != before;
            removed
        });
        removed
    }
}

impl<T: Keyed + Clone> Default for SyncedList<T> {
    fn default() -> Self {
        Self::new()
    }
}
