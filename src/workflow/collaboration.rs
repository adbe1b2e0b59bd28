//! Collaboration flow: admin-to-admin requests on peer-owned boards.
//!
//! Restricted on both sides - the requester must hold the admin role and
//! the target board must be owned by another admin. On acceptance the
//! requester joins as an ordinary member: the elevated account role does
//! not propagate into borrowed boards.

use crate::domain::{
    Board, BoardId, CollaborationRequest, Message, MessageKind, MessageMeta, RequestId,
    RequestKind, RequestRef, RequestStatus, UserId,
};
use crate::error::{Error, Result};
use crate::notifier::templates;
use crate::realtime::{RealtimeEvent, Room};

use super::WorkflowEngine;

impl WorkflowEngine {
    /// Submit a collaboration request against another admin's board.
    pub async fn send_collaboration_request(
        &self,
        requester: UserId,
        board_id: BoardId,
        message: &str,
    ) -> Result<CollaborationRequest> {
        let requester_user = self.require_user(requester).await?;
        if !requester_user.role.is_admin() {
            return Err(Error::forbidden(
                "Only admin users can send collaboration requests",
            ));
        }

        let board = self.require_board(board_id).await?;
        let owner = self.require_user(board.owner).await?;
        if !owner.role.is_admin() {
            return Err(Error::invalid_role(
                "Can only collaborate with admin-owned boards",
            ));
        }
        if board.owner == requester {
            return Err(Error::invalid_state("Cannot collaborate on your own board"));
        }

        if board.is_member(requester) {
            return Err(Error::conflict("You are already a member of this board"));
        }
        if self
            .ledger
            .collaborations
            .pending_for(board_id, requester)
            .await
            .is_some()
        {
            return Err(Error::conflict("Collaboration request already pending"));
        }

        let request = CollaborationRequest::new(board_id, requester, board.owner, message);
        self.ledger.collaborations.insert(request.clone()).await;

        let notification = Message::new(
            board.owner,
            requester,
            Some(board_id),
            MessageKind::CollaborationRequest,
            format!(
                "{} (admin) requested to collaborate on your board \"{}\"",
                requester_user.name, board.title
            ),
            MessageMeta::for_request(
                &board.title,
                RequestRef::new(RequestKind::CollaborationRequest, request.id),
            ),
        );
        self.messages.insert(notification.clone()).await;

        self.publish(
            Room::User(board.owner),
            RealtimeEvent::message_received(&notification),
        );
        self.email(
            &owner.email,
            templates::collaboration_request(&requester_user.name, &board.title),
        );

        tracing::info!(
            "collaboration request {} created for board {} by {}",
            request.id,
            board_id,
            requester
        );
        Ok(request)
    }

    /// Pending collaboration requests across every board the actor owns,
    /// newest first.
    pub async fn collaboration_requests_for_owner(
        &self,
        owner: UserId,
    ) -> Vec<CollaborationRequest> {
        let mut requests = Vec::new();
        for board in self.boards.boards_owned_by(owner).await {
            requests.extend(self.ledger.collaborations.pending_for_board(board.id).await);
        }
        requests.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        requests
    }

    /// Every collaboration request the actor has sent, any status, newest
    /// first.
    pub async fn sent_collaboration_requests(
        &self,
        requester: UserId,
    ) -> Vec<CollaborationRequest> {
        self.ledger.collaborations.all_for_requester(requester).await
    }

    /// Pending collaboration requests for one board. Owner only.
    pub async fn collaboration_requests_for_board(
        &self,
        actor: UserId,
        board_id: BoardId,
    ) -> Result<Vec<CollaborationRequest>> {
        let board = self.require_board(board_id).await?;
        if board.owner != actor {
            return Err(Error::forbidden(
                "Only the board owner can view collaboration requests",
            ));
        }
        Ok(self.ledger.collaborations.pending_for_board(board_id).await)
    }

    /// Accept a collaboration request. Owner only; the requester joins as
    /// an ordinary member.
    pub async fn accept_collaboration_request(
        &self,
        actor: UserId,
        request_id: RequestId,
    ) -> Result<Board> {
        let request = self
            .ledger
            .collaborations
            .get(request_id)
            .await
            .ok_or_else(|| Error::not_found("Collaboration request not found"))?;
        let board = self.require_board(request.board).await?;
        if board.owner != actor {
            return Err(Error::forbidden(
                "Only the board owner can accept collaboration requests",
            ));
        }
        let requester_user = self.require_user(request.requester).await?;

        self.ledger
            .collaborations
            .transition_if_pending(request_id, RequestStatus::Accepted, |_| {})
            .await?;

        let (board, participant) = self
            .boards
            .add_member_if_absent(request.board, request.requester)
            .await?;

        let request_ref = RequestRef::new(RequestKind::CollaborationRequest, request_id);
        self.messages
            .update_by_request_ref(request_ref, |m| {
                m.record_response(RequestStatus::Accepted, actor, None);
            })
            .await;

        self.publish(
            Room::Board(board.id),
            RealtimeEvent::participant_added(&participant, &requester_user),
        );
        let message_updated = || {
            RealtimeEvent::message_updated(
                request_id,
                RequestKind::CollaborationRequest,
                RequestStatus::Accepted,
            )
        };
        self.publish(Room::User(actor), message_updated());
        self.publish(Room::User(request.requester), message_updated());
        self.publish(
            Room::Board(board.id),
            RealtimeEvent::request_updated(
                request_id,
                RequestKind::CollaborationRequest,
                RequestStatus::Accepted,
            ),
        );
        self.publish(
            Room::User(request.requester),
            RealtimeEvent::board_joined(&board),
        );

        let owner_name = self.display_name(actor).await;
        self.email(
            &requester_user.email,
            templates::request_accepted(&board.title, &owner_name),
        );

        tracing::info!("collaboration request {} accepted by {}", request_id, actor);
        Ok(board)
    }

    /// Reject a collaboration request with an optional reason. Owner only.
    pub async fn reject_collaboration_request(
        &self,
        actor: UserId,
        request_id: RequestId,
        reason: Option<&str>,
    ) -> Result<()> {
        let request = self
            .ledger
            .collaborations
            .get(request_id)
            .await
            .ok_or_else(|| Error::not_found("Collaboration request not found"))?;
        let board = self.require_board(request.board).await?;
        if board.owner != actor {
            return Err(Error::forbidden(
                "Only the board owner can reject collaboration requests",
            ));
        }

        self.ledger
            .collaborations
            .transition_if_pending(request_id, RequestStatus::Rejected, |_| {})
            .await?;

        let request_ref = RequestRef::new(RequestKind::CollaborationRequest, request_id);
        self.messages
            .update_by_request_ref(request_ref, |m| {
                m.record_response(RequestStatus::Rejected, actor, reason);
            })
            .await;

        let message_updated = || {
            RealtimeEvent::message_updated(
                request_id,
                RequestKind::CollaborationRequest,
                RequestStatus::Rejected,
            )
        };
        self.publish(Room::User(actor), message_updated());
        self.publish(Room::User(request.requester), message_updated());
        self.publish(
            Room::Board(board.id),
            RealtimeEvent::request_updated(
                request_id,
                RequestKind::CollaborationRequest,
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

        tracing::info!("collaboration request {} rejected by {}", request_id, actor);
        Ok(())
    }
}
