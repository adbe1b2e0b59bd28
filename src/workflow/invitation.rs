//! Invitation flow: board owner invites a user by email address.

use crate::domain::{
    Board, BoardId, Invitation, Message, MessageKind, MessageMeta, RequestId, RequestKind,
    RequestRef, RequestStatus, UserId,
};
use crate::error::{Error, Result};
use crate::notifier::templates;
use crate::realtime::{RealtimeEvent, Room};

use super::WorkflowEngine;

impl WorkflowEngine {
    /// Send an invitation to the user owning `recipient_email`.
    ///
    /// Only the board owner may invite. Admin-owned addresses are rejected
    /// with `InvalidRole` - peers use the collaboration flow instead.
    pub async fn send_invitation(
        &self,
        sender: UserId,
        board_id: BoardId,
        recipient_email: &str,
        message: &str,
    ) -> Result<Invitation> {
        let sender_user = self.require_user(sender).await?;
        let board = self.require_board(board_id).await?;
        if board.owner != sender {
            return Err(Error::forbidden("Only the board owner can send invitations"));
        }

        let recipient = self
            .users
            .by_email(recipient_email)
            .await
            .ok_or_else(|| Error::not_found("No account exists for that email address"))?;
        if recipient.role.is_admin() {
            return Err(Error::invalid_role(
                "This email belongs to an admin. Use a collaboration request instead.",
            ));
        }

        if board.is_member(recipient.id) {
            return Err(Error::conflict("User is already a member of this board"));
        }
        if self
            .ledger
            .invitations
            .pending_for_email(board_id, recipient_email)
            .await
            .is_some()
        {
            return Err(Error::conflict(
                "An invitation has already been sent to this user",
            ));
        }

        let invitation = Invitation::new(board_id, sender, recipient_email, recipient.id, message);
        self.ledger.invitations.insert(invitation.clone()).await;

        let notification = Message::new(
            recipient.id,
            sender,
            Some(board_id),
            MessageKind::Invitation,
            format!("You have been invited to join \"{}\"", board.title),
            MessageMeta::for_request(
                &board.title,
                RequestRef::new(RequestKind::Invitation, invitation.id),
            ),
        );
        self.messages.insert(notification.clone()).await;

        self.publish(
            Room::User(recipient.id),
            RealtimeEvent::message_received(&notification),
        );

        let link = format!("{}/messages", self.config().client_url);
        self.email(
            &recipient.email,
            templates::invitation(&sender_user.name, &board.title, &link),
        );

        tracing::info!(
            "invitation {} sent for board {} to {}",
            invitation.id,
            board_id,
            recipient_email
        );
        Ok(invitation)
    }

    /// Pending invitations addressed to `email`, newest first.
    pub async fn pending_invitations_for_email(&self, email: &str) -> Vec<Invitation> {
        self.ledger.invitations.pending_for_recipient_email(email).await
    }

    /// Accept an invitation; the accepting actor becomes a member.
    ///
    /// The pending compare-and-set is the only re-entrancy guard: a second
    /// accept (or a reject racing it) fails with `Conflict` and mutates
    /// nothing.
    pub async fn accept_invitation(&self, actor: UserId, invitation_id: RequestId) -> Result<Board> {
        self.ledger
            .invitations
            .get(invitation_id)
            .await
            .ok_or_else(|| Error::not_found("Invitation not found"))?;
        let actor_user = self.require_user(actor).await?;

        let invitation = self
            .ledger
            .invitations
            .transition_if_pending(invitation_id, RequestStatus::Accepted, |_| {})
            .await?;

        let (board, participant) = self
            .boards
            .add_member_if_absent(invitation.board, actor)
            .await?;

        let request_ref = RequestRef::new(RequestKind::Invitation, invitation_id);
        let updated = self
            .messages
            .update_by_request_ref(request_ref, |m| {
                m.record_response(RequestStatus::Accepted, actor, None);
            })
            .await;
        if updated.is_none() {
            tracing::warn!("no notification found for invitation {}", invitation_id);
        }

        self.publish(
            Room::Board(board.id),
            RealtimeEvent::participant_added(&participant, &actor_user),
        );
        self.publish(Room::User(actor), RealtimeEvent::board_joined(&board));
        let message_updated = || {
            RealtimeEvent::message_updated(
                invitation_id,
                RequestKind::Invitation,
                RequestStatus::Accepted,
            )
        };
        self.publish(Room::User(actor), message_updated());
        self.publish(Room::User(invitation.sender), message_updated());

        if let Some(sender) = self.users.get(invitation.sender).await {
            self.email(
                &sender.email,
                templates::request_accepted(&board.title, &actor_user.name),
            );
        }

        tracing::info!("invitation {} accepted by {}", invitation_id, actor);
        Ok(board)
    }

    /// Reject an invitation, optionally with a reason recorded on the
    /// linked notification.
    pub async fn reject_invitation(
        &self,
        actor: UserId,
        invitation_id: RequestId,
        reason: Option<&str>,
    ) -> Result<()> {
        let invitation = self
            .ledger
            .invitations
            .get(invitation_id)
            .await
            .ok_or_else(|| Error::not_found("Invitation not found"))?;
        let actor_user = self.require_user(actor).await?;

        self.ledger
            .invitations
            .transition_if_pending(invitation_id, RequestStatus::Rejected, |_| {})
            .await?;

        let request_ref = RequestRef::new(RequestKind::Invitation, invitation_id);
        self.messages
            .update_by_request_ref(request_ref, |m| {
                m.record_response(RequestStatus::Rejected, actor, reason);
            })
            .await;

        let message_updated = || {
            RealtimeEvent::message_updated(
                invitation_id,
                RequestKind::Invitation,
                RequestStatus::Rejected,
            )
        };
        self.publish(Room::User(actor), message_updated());
        self.publish(Room::User(invitation.sender), message_updated());

        if let Some(sender) = self.users.get(invitation.sender).await {
            let board_title = self
                .boards
                .get(invitation.board)
                .await
                .map(|b| b.title)
                .unwrap_or_default();
            self.email(
                &sender.email,
                templates::request_rejected(&board_title, &actor_user.name, reason),
            );
        }

        tracing::info!("invitation {} rejected by {}", invitation_id, actor);
        Ok(())
    }
}
