//! Notification store.
//!
//! Message records are inserted once, when their originating request (or a
//! removal) happens, and afterwards only ever updated in place. The
//! response path finds the record through its metadata back-reference via
//! [`update_by_request_ref`](MessageStore::update_by_request_ref); there is
//! no second insert path for the same request.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::{Message, MessageId, RequestRef, UserId};

#[derive(Clone, Default)]
pub struct MessageStore {
    messages: Arc<RwLock<HashMap<MessageId, Message>>>,
}

impl MessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, message: Message) {
        self.messages.write().await.insert(message.id, message);
    }

    pub async fn get(&self, id: MessageId) -> Option<Message> {
        self.messages.read().await.get(&id).cloned()
    }

    /// All notifications for a recipient, newest first.
    pub async fn for_recipient(&self, recipient: UserId) -> Vec<Message> {
        let messages = self.messages.read().await;
        let mut found: Vec<Message> = messages
            .values()
            .filter(|m| m.recipient == recipient)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        found
    }

    pub async fn unread_count(&self, recipient: UserId) -> usize {
        self.messages
            .read()
            .await
            .values()
            .filter(|m| m.recipient == recipient && !m.read)
            .count()
    }

    /// Mark one of the recipient's notifications as read.
    pub async fn mark_read(&self, id: MessageId, recipient: UserId) -> Option<Message> {
        let mut messages = self.messages.write().await;
        let message = messages
            .values_mut()
            .find(|m| m.id == id && m.recipient == recipient)?;
        message.read = true;
        Some(message.clone())
    }

    /// Mark all of the recipient's notifications as read; returns how many
    /// flipped.
    pub async fn mark_all_read(&self, recipient: UserId) -> usize {
        let mut messages = self.messages.write().await;
        let mut flipped = 0;
        for message in messages.values_mut() {
            if message.recipient == recipient && !message.read {
                message.read = true;
                flipped += 1;
            }
        }
        flipped
    }

    /// Update the message whose metadata back-reference equals `request`.
    ///
    /// Returns the updated record, or `None` when no notification carries
    /// that back-reference. Never inserts.
    pub async fn update_by_request_ref(
        &self,
        request: RequestRef,
        mutate: impl FnOnce(&mut Message),
    ) -> Option<Message> {
        let mut messages = self.messages.write().await;
        let message = messages
            .values_mut()
            .find(|m| m.metadata.request == Some(request))?;
        mutate(message);
        Some(message.clone())
    }
}
