//! Notification surface: list, unread count, read/unread toggles.
//!
//! The recipient owns the read flag; the workflow engine itself never
//! deletes a notification.

use crate::domain::{Message, MessageId, UserId};
use crate::error::{Error, Result};

use super::WorkflowEngine;

impl WorkflowEngine {
    /// All notifications for the caller, newest first.
    pub async fn messages_for(&self, user: UserId) -> Vec<Message> {
        self.messages.for_recipient(user).await
    }

    /// How many of the caller's notifications are unread.
    pub async fn unread_count(&self, user: UserId) -> usize {
        self.messages.unread_count(user).await
    }

    /// Mark one of the caller's notifications as read.
    pub async fn mark_read(&self, user: UserId, message_id: MessageId) -> Result<Message> {
        self.messages
            .mark_read(message_id, user)
            .await
            .ok_or_else(|| Error::not_found("Message not found"))
    }

    /// Mark all of the caller's notifications as read; returns how many
    /// flipped.
    pub async fn mark_all_read(&self, user: UserId) -> usize {
        self.messages.mark_all_read(user).await
    }
}
