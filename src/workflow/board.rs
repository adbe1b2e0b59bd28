//! Board administration: creation, deletion and member removal.
//!
//! Removal belongs to the same invariant class as the accept flows - it is
//! the one other path allowed to touch members/participants, and it
//! creates a genuinely new notification rather than updating an existing
//! one, since a removal has no prior pending request.

use crate::domain::{
    Board, BoardId, Message, MessageKind, MessageMeta, UserId,
};
use crate::error::{Error, Result};
use crate::notifier::templates;
use crate::realtime::{RealtimeEvent, Room};

use super::WorkflowEngine;

impl WorkflowEngine {
    /// Create a board. Admin only; the creator becomes its immutable owner.
    pub async fn create_board(
        &self,
        actor: UserId,
        title: &str,
        description: &str,
        color: Option<String>,
    ) -> Result<Board> {
        let actor_user = self.require_user(actor).await?;
        if !actor_user.role.is_admin() {
            return Err(Error::forbidden("Only admin users can create boards"));
        }

        let board = Board::new(actor, title, description, color);
        self.boards.insert(board.clone()).await;

        for member in &board.members {
            self.publish(
                Room::User(*member),
                RealtimeEvent::board_created(board.id, *member),
            );
        }

        tracing::info!("board {} created by {}", board.id, actor);
        Ok(board)
    }

    pub async fn get_board(&self, board_id: BoardId) -> Result<Board> {
        self.require_board(board_id).await
    }

    /// Edit a board's title, description or color. Owner only; `None`
    /// fields stay as they are. Ownership and membership are not editable
    /// through this path.
    pub async fn update_board(
        &self,
        actor: UserId,
        board_id: BoardId,
        title: Option<&str>,
        description: Option<&str>,
        color: Option<&str>,
    ) -> Result<Board> {
        let board = self.require_board(board_id).await?;
        if board.owner != actor {
            return Err(Error::forbidden("Only the board owner can update this board"));
        }

        let board = self
            .boards
            .update(board_id, |b| {
                if let Some(title) = title {
                    b.title = title.to_string();
                }
                if let Some(description) = description {
                    b.description = description.to_string();
                }
                if let Some(color) = color {
                    b.color = color.to_string();
                }
            })
            .await?;

        tracing::info!("board {} updated by {}", board_id, actor);
        Ok(board)
    }

    /// Boards the user owns or is a member of, newest first.
    pub async fn boards_for_user(&self, user: UserId) -> Vec<Board> {
        self.boards.boards_for_user(user).await
    }

    /// Remove a member from a board. Owner only; the owner cannot be
    /// removed.
    ///
    /// Prunes the target from members and participants in one store
    /// update, records a new `removed_from_board` notification, emails the
    /// removed user and fans out to their personal room and the board room.
    pub async fn remove_member(
        &self,
        actor: UserId,
        board_id: BoardId,
        member: UserId,
        reason: Option<&str>,
    ) -> Result<Board> {
        let board = self.require_board(board_id).await?;
        if board.owner != actor {
            return Err(Error::forbidden("Only the board owner can remove members"));
        }
        if member == board.owner {
            return Err(Error::invalid_state("Cannot remove board owner"));
        }

        let board = self.boards.remove_member(board_id, member).await?;

        if let Some(removed_user) = self.users.get(member).await {
            let suffix = reason.map(|r| format!(": {r}")).unwrap_or_default();
            let notification = Message::new(
                member,
                actor,
                Some(board_id),
                MessageKind::RemovedFromBoard,
                format!(
                    "You have been removed from board \"{}\"{}",
                    board.title, suffix
                ),
                MessageMeta {
                    board_name: Some(board.title.clone()),
                    reason: Some(reason.unwrap_or("No reason provided").to_string()),
                    ..MessageMeta::default()
                },
            );
            self.messages.insert(notification.clone()).await;

            self.publish(
                Room::User(member),
                RealtimeEvent::board_removed(board_id, member),
            );
            self.publish(
                Room::User(member),
                RealtimeEvent::message_received(&notification),
            );

            let owner_name = self.display_name(actor).await;
            self.email(
                &removed_user.email,
                templates::removal(&board.title, &owner_name, reason),
            );
        }

        self.publish(
            Room::Board(board_id),
            RealtimeEvent::participant_removed(member),
        );

        tracing::info!("member {} removed from board {} by {}", member, board_id, actor);
        Ok(board)
    }

    /// Delete a board. Owner only. Lists and cards hanging off the board
    /// are cascaded by their own stores outside this crate.
    pub async fn delete_board(&self, actor: UserId, board_id: BoardId) -> Result<()> {
        let board = self.require_board(board_id).await?;
        if board.owner != actor {
            return Err(Error::forbidden("Only the board owner can delete this board"));
        }

        self.boards.remove(board_id).await;

        for member in &board.members {
            self.publish(
                Room::User(*member),
                RealtimeEvent::board_deleted(board_id, *member),
            );
        }

        tracing::info!("board {} deleted by {}", board_id, actor);
        Ok(())
    }
}
