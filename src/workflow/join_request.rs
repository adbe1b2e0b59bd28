//! Join-request flow: a prospective member asks the board owner to join.
//!
//! Mirror of the invitation flow, initiated from the other side: any
//! authenticated user may request, and the board owner accepts or rejects.
//! Accept and reject additionally fan a `request:updated` event to the
//! board room so open board views refresh their pending-request badges.

use crate::domain::{
    Board, BoardId, JoinRequest, Message, MessageKind, MessageMeta, RequestId, RequestKind,
    RequestRef, RequestStatus, UserId,
};
use crate::error::{Error, Result};
use crate::notifier::templates;
use crate::realtime::{RealtimeEvent, Room};

use super::WorkflowEngine;

impl WorkflowEngine {
    /// Submit a request to join a board.
    pub async fn create_join_request(
        &self,
        requester: UserId,
        board_id: BoardId,
        message: &str,
    ) -> Result<JoinRequest> {
        let requester_user = self.require_user(requester).await?;
        let board = self.require_board(board_id).await?;

        if self
            .ledger
            .join_requests
            .pending_for(board_id, requester)
            .await
            .is_some()
        {
            return Err(Error::conflict("Join request already pending"));
        }

        let request = JoinRequest::new(board_id, requester, message);
        self.ledger.join_requests.insert(request.clone()).await;

        let notification = Message::new(
            board.owner,
            requester,
            Some(board_id),
            MessageKind::JoinRequest,
            format!(
                "{} ({}) requested to join \"{}\"",
                requester_user.name, requester_user.email, board.title
            ),
            MessageMeta::for_request(
                &board.title,
                RequestRef::new(RequestKind::JoinRequest, request.id),
            ),
        );
        self.messages.insert(notification.clone()).await;

        self.publish(
            Room::User(board.owner),
            RealtimeEvent::message_received(&notification),
        );

        if let Some(owner) = self.users.get(board.owner).await {
            self.email(
                &owner.email,
                templates::join_request(&requester_user.name, &board.title),
            );
        }

        tracing::info!(
            "join request {} created for board {} by {}",
            request.id,
            board_id,
            requester
        );
        Ok(request)
    }

    /// Pending join requests for a board, newest first. Owner only.
    pub async fn pending_join_requests(
        &self,
        actor: UserId,
        board_id: BoardId,
    ) -> Result<Vec<JoinRequest>> {
        let board = self.require_board(board_id).await?;
        if board.owner != actor {
            return Err(Error::forbidden(
                "Only the board owner can view join requests",
            ));
        }
        Ok(self.ledger.join_requests.pending_for_board(board_id).await)
    }

    /// Accept a join request. Owner only.
    pub async fn accept_join_request(&self, actor: UserId, request_id: RequestId) -> Result<Board> {
        let request = self
            .ledger
            .join_requests
            .get(request_id)
            .await
            .ok_or_else(|| Error::not_found("Join request not found"))?;
        let board = self.require_board(request.board).await?;
        if board.owner != actor {
            return Err(Error::forbidden(
                "Only the board owner can accept join requests",
            ));
        }
        let requester_user = self.require_user(request.requester).await?;

        self.ledger
            .join_requests
            .transition_if_pending(request_id, RequestStatus::Accepted, |_| {})
            .await?;

        let (board, participant) = self
            .boards
            .add_member_if_absent(request.board, request.requester)
            .await?;

        let request_ref = RequestRef::new(RequestKind::JoinRequest, request_id);
        self.messages
            .update_by_request_ref(request_ref, |m| {
                m.record_response(RequestStatus::Accepted, actor, None);
            })
            .await;

        self.publish(
            Room::Board(board.id),
            RealtimeEvent::participant_added(&participant, &requester_user),
        );
        self.publish(
            Room::User(request.requester),
            RealtimeEvent::board_joined(&board),
        );
        let message_updated = || {
            RealtimeEvent::message_updated(
                request_id,
                RequestKind::JoinRequest,
                RequestStatus::Accepted,
            )
        };
        self.publish(Room::User(actor), message_updated());
        self.publish(Room::User(request.requester), message_updated());
        self.publish(
            Room::Board(board.id),
            RealtimeEvent::request_updated(
                request_id,
                RequestKind::JoinRequest,
                RequestStatus::Accepted,
            ),
        );

        let owner_name = self.display_name(actor).await;
        self.email(
            &requester_user.email,
            templates::request_accepted(&board.title, &owner_name),
        );

        tracing::info!("join request {} accepted by {}", request_id, actor);
        Ok(board)
    }

    /// Reject a join request with an optional reason. Owner only.
    pub async fn reject_join_request(
        &self,
        actor: UserId,
        request_id: RequestId,
        reason: Option<&str>,
    ) -> Result<()> {
        let request = self
            .ledger
            .join_requests
            .get(request_id)
            .await
            .ok_or_else(|| Error::not_found("Join request not found"))?;
        let board = self.require_board(request.board).await?;
        if board.owner != actor {
            return Err(Error::forbidden(
                "Only the board owner can reject join requests",
            ));
        }

        self.ledger
            .join_requests
            .transition_if_pending(request_id, RequestStatus::Rejected, |r| {
                r.rejection_reason = reason.unwrap_or_default().to_string();
            })
            .await?;

        let request_ref = RequestRef::new(RequestKind::JoinRequest, request_id);
        self.messages
            .update_by_request_ref(request_ref, |m| {
                m.record_response(RequestStatus::Rejected, actor, reason);
            })
            .await;

        let message_updated = || {
            RealtimeEvent::message_updated(
                request_id,
                RequestKind::JoinRequest,
                RequestStatus::Rejected,
            )
        };
        self.publish(Room::User(actor), message_updated());
        self.publish(Room::User(request.requester), message_updated());
        self.publish(
            Room::Board(board.id),
            RealtimeEvent::request_updated(
                request_id,
                RequestKind::JoinRequest,
                RequestStatus::Rejected,
            ),
        );

        if let Some(requester_user) = self.users.get(request.requester).await {
            let owner_name = self.display_name(actor).await;
            self.email(
                &requester_user.email,
                templates::request_rejected(&board.title, &owner_name, reason),
            );
        }

        tracing::info!("join request {} rejected by {}", request_id, actor);
        Ok(())
    }
}
