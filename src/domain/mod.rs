//! Domain Model
//!
//! Core records of the system: users, boards with their membership lists,
//! the three membership-request variants, and the notification messages
//! that mirror request lifecycles.

pub mod board;
pub mod message;
pub mod request;
pub mod user;

use uuid::Uuid;

pub type UserId = Uuid;
pub type BoardId = Uuid;
pub type RequestId = Uuid;
pub type MessageId = Uuid;
pub type SessionId = Uuid;

pub use board::{Board, Participant, ParticipantRole};
pub use message::{Message, MessageKind, MessageMeta, RequestRef};
pub use request::{
    CollaborationRequest, Invitation, JoinRequest, MembershipRequest, RequestKind, RequestStatus,
};
pub use user::{Role, User};
