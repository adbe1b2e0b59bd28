//! Notification messages.
//!
//! Exactly one `Message` exists per request-ledger entry. It is created
//! atomically with the request and located again through its metadata
//! back-reference when the request is accepted or rejected - the response
//! path updates it in place and never inserts a second record. The `status`
//! field mirrors the originating request's status at all times.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::request::{RequestKind, RequestStatus};
use super::{BoardId, MessageId, RequestId, UserId};

/// What a notification is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    Invitation,
    JoinRequest,
    CollaborationRequest,
    RequestAccepted,
    RequestRejected,
    RemovedFromBoard,
}

impl From<RequestKind> for MessageKind {
    fn from(kind: RequestKind) -> Self {
        match kind {
            RequestKind::Invitation => MessageKind::Invitation,
            RequestKind::JoinRequest => MessageKind::JoinRequest,
            RequestKind::CollaborationRequest => MessageKind::CollaborationRequest,
        }
    }
}

/// Back-reference naming the ledger entry that spawned a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestRef {
    pub kind: RequestKind,
    pub id: RequestId,
}

impl RequestRef {
    pub fn new(kind: RequestKind, id: RequestId) -> Self {
        Self { kind, id }
    }
}

/// Free-form metadata bag carried by a notification.
///
/// `request` is the back-reference; `responded_at`, `responded_by` and
/// `reason` are late-bound - empty at creation, filled in when the request
/// is resolved.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageMeta {
    pub board_name: Option<String>,
    pub request: Option<RequestRef>,
    pub reason: Option<String>,
    pub responded_at: Option<DateTime<Utc>>,
    pub responded_by: Option<UserId>,
}

impl MessageMeta {
    pub fn for_request(board_name: impl Into<String>, request: RequestRef) -> Self {
        Self {
            board_name: Some(board_name.into()),
            request: Some(request),
            ..Self::default()
        }
    }
}

/// A durable notification record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub recipient: UserId,
    pub sender: UserId,
    pub board: Option<BoardId>,
    pub kind: MessageKind,
    pub content: String,
    pub metadata: MessageMeta,
    pub read: bool,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn new(
        recipient: UserId,
        sender: UserId,
        board: Option<BoardId>,
        kind: MessageKind,
        content: impl Into<String>,
        metadata: MessageMeta,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            recipient,
            sender,
            board,
            kind,
            content: content.into(),
            metadata,
            read: false,
            status: RequestStatus::Pending,
            created_at: Utc::now(),
        }
    }

    /// Record the outcome of the originating request on this notification.
    pub fn record_response(
        &mut self,
        status: RequestStatus,
        responded_by: UserId,
        reason: Option<&str>,
    ) {
        self.status = status;
        self.metadata.responded_at = Some(Utc::now());
        self.metadata.responded_by = Some(responded_by);
        if let Some(reason) = reason {
            self.metadata.reason = Some(reason.to_string());
        }
    }
}
