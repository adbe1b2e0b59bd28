//! Ephemeral board presence.
//!
//! Process-local map of which sessions currently have a live view of each
//! board. It is empty after a restart and repopulates as clients
//! reconnect; nothing here is a source of truth for board membership -
//! only for "who is watching right now".

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::domain::{BoardId, SessionId, UserId};

/// One live session watching a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresenceEntry {
    pub user: UserId,
    pub session: SessionId,
}

#[derive(Clone, Default)]
pub struct Presence {
    boards: Arc<Mutex<HashMap<BoardId, Vec<PresenceEntry>>>>,
}

impl Presence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn join_board(&self, board: BoardId, user: UserId, session: SessionId) {
        let mut boards = self.boards.lock().unwrap();
        boards
            .entry(board)
            .or_default()
            .push(PresenceEntry { user, session });
    }

    pub fn leave_board(&self, board: BoardId, session: SessionId) {
        let mut boards = self.boards.lock().unwrap();
        if let Some(entries) = boards.get_mut(&board) {
            entries.retain(|e| e.session != session);
            if entries.is_empty() {
                boards.remove(&board);
            }
        }
    }

    /// Drop a session from every board it was watching.
    pub fn disconnect(&self, session: SessionId) {
        let mut boards = self.boards.lock().unwrap();
        for entries in boards.values_mut() {
            entries.retain(|e| e.session != session);
        }
        boards.retain(|_, entries| !entries.is_empty());
    }

    pub fn watching(&self, board: BoardId) -> Vec<PresenceEntry> {
        self.boards
            .lock()
            .unwrap()
            .get(&board)
            .cloned()
            .unwrap_or_default()
    }
}
