//! Boards and their membership lists.
//!
//! A board keeps two views of the same membership: the flat `members` set
//! and the richer `participants` list carrying per-user roles and join
//! timestamps. Both are owned exclusively by this type - the mutators here
//! are the only code allowed to append to or prune them, which is what
//! keeps the "a user appears in participants at most once" invariant in one
//! place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{BoardId, UserId};

pub const DEFAULT_BOARD_COLOR: &str = "#6366f1";

/// Role a user holds within one board.
///
/// Distinct from the account-level [`Role`](super::Role): an admin who
/// collaborates on another admin's board participates there as an ordinary
/// `Member` - the elevated account role does not propagate into borrowed
/// boards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantRole {
    Owner,
    Admin,
    Member,
}

/// One entry of a board's participants list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    pub user: UserId,
    pub role: ParticipantRole,
    pub joined_at: DateTime<Utc>,
}

/// A shared workspace with one owner, a member set and a participants list.
///
/// Invariants, established by [`Board::new`] and preserved by the mutators:
/// - the owner is always in `members` and has a participants entry with
///   role `owner`; the owner is immutable after creation
/// - `members` holds no duplicates
/// - a user appears in `participants` at most once
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    pub id: BoardId,
    pub title: String,
    pub description: String,
    pub color: String,
    pub owner: UserId,
    pub members: Vec<UserId>,
    pub participants: Vec<Participant>,
    pub created_at: DateTime<Utc>,
}

impl Board {
    pub fn new(
        owner: UserId,
        title: impl Into<String>,
        description: impl Into<String>,
        color: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            color: color.unwrap_or_else(|| DEFAULT_BOARD_COLOR.to_string()),
            owner,
            members: vec![owner],
            participants: vec![Participant {
                user: owner,
                role: ParticipantRole::Owner,
                joined_at: now,
            }],
            created_at: now,
        }
    }

    pub fn is_member(&self, user: UserId) -> bool {
        self.members.contains(&user)
    }

    pub fn participant(&self, user: UserId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.user == user)
    }

    /// Add `user` to members and participants with role `member`.
    ///
    /// Idempotent: retried accepts landing on a board that already holds the
    /// user change nothing. Tolerant of partial prior state - a user present
    /// in only one of the two lists is completed into the other. Returns the
    /// participant entry now in effect.
    pub fn add_member(&mut self, user: UserId) -> Participant {
        if !self.members.contains(&user) {
            self.members.push(user);
        }
        if let Some(existing) = self.participants.iter().find(|p| p.user == user) {
            return existing.clone();
        }
        let participant = Participant {
            user,
            role: ParticipantRole::Member,
            joined_at: Utc::now(),
        };
        self.participants.push(participant.clone());
        participant
    }

    /// Prune `user` from both members and participants.
    ///
    /// The caller is responsible for refusing to remove the owner; this
    /// mutator only keeps the two lists consistent with each other.
    pub fn remove_member(&mut self, user: UserId) {
        self.members.retain(|m| *m != user);
        self.participants.retain(|p| p.user != user);
    }
}
