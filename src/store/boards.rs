//! Board membership store.
//!
//! The board document is the only resource mutated by more than one flow:
//! invitation accept, join-request accept, collaboration accept and member
//! removal all touch `members`/`participants`. Every mutation here runs as
//! read-modify-write under one write-lock acquisition, so concurrent
//! accepts cannot interleave between the presence check and the append and
//! a lost update cannot occur.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::{Board, BoardId, Participant, UserId};
use crate::error::{Error, Result};

#[derive(Clone, Default)]
pub struct BoardStore {
    boards: Arc<RwLock<HashMap<BoardId, Board>>>,
}

impl BoardStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, board: Board) {
        self.boards.write().await.insert(board.id, board);
    }

    pub async fn get(&self, id: BoardId) -> Option<Board> {
        self.boards.read().await.get(&id).cloned()
    }

    /// Boards the user owns or is a member of, newest first.
    pub async fn boards_for_user(&self, user: UserId) -> Vec<Board> {
        let boards = self.boards.read().await;
        let mut found: Vec<Board> = boards
            .values()
            .filter(|b| b.owner == user || b.is_member(user))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        found
    }

    /// Boards owned by the user.
    pub async fn boards_owned_by(&self, owner: UserId) -> Vec<Board> {
        self.boards
            .read()
            .await
            .values()
            .filter(|b| b.owner == owner)
            .cloned()
            .collect()
    }

    /// Atomically add `user` to the board's members and participants if
    /// absent. Returns the updated board together with the participant entry
    /// now in effect.
    pub async fn add_member_if_absent(
        &self,
        board_id: BoardId,
        user: UserId,
    ) -> Result<(Board, Participant)> {
        let mut boards = self.boards.write().await;
        let board = boards
            .get_mut(&board_id)
            .ok_or_else(|| Error::not_found("Board not found"))?;
        let participant = board.add_member(user);
        Ok((board.clone(), participant))
    }

    /// Apply an edit to a board as one read-modify-write under the write
    /// lock. Returns the board as updated.
    pub async fn update(
        &self,
        board_id: BoardId,
        mutate: impl FnOnce(&mut Board),
    ) -> Result<Board> {
        let mut boards = self.boards.write().await;
        let board = boards
            .get_mut(&board_id)
            .ok_or_else(|| Error::not_found("Board not found"))?;
        mutate(board);
        Ok(board.clone())
    }

    /// Atomically prune `user` from the board's members and participants.
    pub async fn remove_member(&self, board_id: BoardId, user: UserId) -> Result<Board> {
        let mut boards = self.boards.write().await;
        let board = boards
            .get_mut(&board_id)
            .ok_or_else(|| Error::not_found("Board not found"))?;
        board.remove_member(user);
        Ok(board.clone())
    }

    pub async fn remove(&self, board_id: BoardId) -> Option<Board> {
        self.boards.write().await.remove(&board_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[tokio::test]
    async fn add_member_if_absent_is_atomic_per_call() {
        let store = BoardStore::new();
        let owner = Uuid::new_v4();
        let board = Board::new(owner, "Roadmap", "", None);
        let board_id = board.id;
        store.insert(board).await;

        let user = Uuid::new_v4();
        let (after_first, _) = store.add_member_if_absent(board_id, user).await.unwrap();
        let (after_second, _) = store.add_member_if_absent(board_id, user).await.unwrap();

        assert_eq!(after_first.members.len(), 2);
        assert_eq!(after_second.members.len(), 2);
        assert_eq!(after_second.participants.len(), 2);
    }

    #[tokio::test]
    async fn missing_board_is_not_found() {
        let store = BoardStore::new();
        let err = store
            .add_member_if_absent(Uuid::new_v4(), Uuid::new_v4())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Board not found");
    }

    #[tokio::test]
    async fn boards_for_user_covers_owned_and_joined() {
        let store = BoardStore::new();
        let owner = Uuid::new_v4();
        let member = Uuid::new_v4();

        let owned = Board::new(owner, "Owned", "", None);
        let mut joined = Board::new(Uuid::new_v4(), "Joined", "", None);
        joined.add_member(member);
        store.insert(owned).await;
        store.insert(joined).await;

        assert_eq!(store.boards_for_user(owner).await.len(), 1);
        assert_eq!(store.boards_for_user(member).await.len(), 1);
        assert_eq!(store.boards_owned_by(member).await.len(), 0);
    }
}
