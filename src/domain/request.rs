//! The three membership-request records.
//!
//! Invitation, join request and collaboration request are kept as three
//! concrete types rather than one tagged union: each has a distinct natural
//! key, its own authorization predicate and its own optional fields (only
//! an invitation carries an email address that may not yet resolve to a
//! member, only a join request stores its rejection reason on the record).
//! What they share - identity, board, requester, lifecycle status - is
//! expressed through the [`MembershipRequest`] trait so the ledger can
//! store and transition all three with the same code.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{BoardId, RequestId, UserId};

/// Lifecycle status of any membership request.
///
/// `Pending` is the only non-terminal state: once a request is accepted or
/// rejected it never changes again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Accepted,
    Rejected,
}

impl RequestStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Accepted => "accepted",
            RequestStatus::Rejected => "rejected",
        }
    }

    pub fn is_pending(self) -> bool {
        matches!(self, RequestStatus::Pending)
    }
}

/// Which of the three request flows a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    Invitation,
    JoinRequest,
    CollaborationRequest,
}

impl RequestKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RequestKind::Invitation => "invitation",
            RequestKind::JoinRequest => "join_request",
            RequestKind::CollaborationRequest => "collaboration_request",
        }
    }

    /// Noun used in caller-facing messages ("Invitation not found").
    pub fn label(self) -> &'static str {
        match self {
            RequestKind::Invitation => "Invitation",
            RequestKind::JoinRequest => "Join request",
            RequestKind::CollaborationRequest => "Collaboration request",
        }
    }
}

/// Common seam over the three request variants.
///
/// `requester` is the user who would become a member on acceptance - for an
/// invitation that is the resolved recipient, not the sending owner.
pub trait MembershipRequest: Clone + Send + Sync + 'static {
    const KIND: RequestKind;

    fn id(&self) -> RequestId;
    fn board(&self) -> BoardId;
    fn requester(&self) -> UserId;
    fn status(&self) -> RequestStatus;
    fn set_status(&mut self, status: RequestStatus);
    fn created_at(&self) -> DateTime<Utc>;
}

/// Owner-to-user invitation, targeting an email address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invitation {
    pub id: RequestId,
    pub board: BoardId,
    pub sender: UserId,
    pub recipient_email: String,
    pub recipient: UserId,
    pub message: String,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
}

impl Invitation {
    pub fn new(
        board: BoardId,
        sender: UserId,
        recipient_email: impl Into<String>,
        recipient: UserId,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            board,
            sender,
            recipient_email: recipient_email.into(),
            recipient,
            message: message.into(),
            status: RequestStatus::Pending,
            created_at: Utc::now(),
        }
    }
}

impl MembershipRequest for Invitation {
    const KIND: RequestKind = RequestKind::Invitation;

    fn id(&self) -> RequestId {
        self.id
    }

    fn board(&self) -> BoardId {
        self.board
    }

    fn requester(&self) -> UserId {
        self.recipient
    }

    fn status(&self) -> RequestStatus {
        self.status
    }

    fn set_status(&mut self, status: RequestStatus) {
        self.status = status;
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// User-to-owner request to join a board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinRequest {
    pub id: RequestId,
    pub board: BoardId,
    pub requester: UserId,
    pub message: String,
    pub status: RequestStatus,
    pub rejection_reason: String,
    pub created_at: DateTime<Utc>,
}

impl JoinRequest {
    pub fn new(board: BoardId, requester: UserId, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            board,
            requester,
            message: message.into(),
            status: RequestStatus::Pending,
            rejection_reason: String::new(),
            created_at: Utc::now(),
        }
    }
}

impl MembershipRequest for JoinRequest {
    const KIND: RequestKind = RequestKind::JoinRequest;

    fn id(&self) -> RequestId {
        self.id
    }

    fn board(&self) -> BoardId {
        self.board
    }

    fn requester(&self) -> UserId {
        self.requester
    }

    fn status(&self) -> RequestStatus {
        self.status
    }

    fn set_status(&mut self, status: RequestStatus) {
        self.status = status;
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Admin-to-admin request to collaborate on a peer-owned board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollaborationRequest {
    pub id: RequestId,
    pub board: BoardId,
    pub requester: UserId,
    pub board_owner: UserId,
    pub message: String,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
}

impl CollaborationRequest {
    pub fn new(
        board: BoardId,
        requester: UserId,
        board_owner: UserId,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            board,
            requester,
            board_owner,
            message: message.into(),
            status: RequestStatus::Pending,
            created_at: Utc::now(),
        }
    }
}

impl MembershipRequest for CollaborationRequest {
    const KIND: RequestKind = RequestKind::CollaborationRequest;

    fn id(&self) -> RequestId {
        self.id
    }

    fn board(&self) -> BoardId {
        self.board
    }

    fn requester(&self) -> UserId {
        self.requester
    }

    fn status(&self) -> RequestStatus {
        self.status
    }

    fn set_status(&mut self, status: RequestStatus) {
        self.status = status;
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
