//! Workflow Engine
//!
//! The root component: three parallel use-case handlers (invitation, join
//! request, collaboration request) plus board administration and the
//! notification surface, orchestrating the stores, the realtime bus and
//! the email notifier.
//!
//! Shared rules, enforced in every handler:
//!
//! 1. Check order is authorization, then existence, then conflicts, then
//!    mutation, so error responses are deterministic.
//! 2. The ledger's pending compare-and-set is the last guard before any
//!    mutation - the single protection against double-processing.
//! 3. Membership appends are presence-checked, so a retried accept cannot
//!    land a duplicate participant.
//! 4. There is exactly one notification write path per request: insert at
//!    create time, update-by-back-reference at response time.
//! 5. Side-effect order is mutate store, update ledger/notification, emit
//!    events, send email. Email and fan-out are best-effort: their
//!    failures are logged and never roll back committed state.

pub mod board;
pub mod collaboration;
pub mod invitation;
pub mod join_request;
pub mod messages;

use std::sync::Arc;

use tokio::sync::broadcast;

use crate::config::Config;
use crate::domain::{Board, BoardId, SessionId, User, UserId};
use crate::error::{Error, Result};
use crate::notifier::templates::EmailContent;
use crate::notifier::EmailNotifier;
use crate::realtime::{Presence, RealtimeEvent, Room, RoomBus};
use crate::store::{BoardStore, MessageStore, RequestLedger, UserDirectory};

/// The membership-request workflow engine.
///
/// Cheap to clone; every handle shares the same stores, bus and notifier.
#[derive(Clone)]
pub struct WorkflowEngine {
    pub users: UserDirectory,
    pub boards: BoardStore,
    pub ledger: RequestLedger,
    pub messages: MessageStore,
    pub bus: RoomBus,
    pub presence: Presence,
    notifier: Arc<dyn EmailNotifier>,
    config: Config,
}

impl WorkflowEngine {
    pub fn new(notifier: Arc<dyn EmailNotifier>, config: Config) -> Self {
        Self {
            users: UserDirectory::new(),
            boards: BoardStore::new(),
            ledger: RequestLedger::new(),
            messages: MessageStore::new(),
            bus: RoomBus::new(config.channel_capacity),
            presence: Presence::new(),
            notifier,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Subscribe a session to its personal room. Clients call this once on
    /// session start.
    pub fn join_user_room(&self, user: UserId) -> broadcast::Receiver<RealtimeEvent> {
        self.bus.subscribe(Room::User(user))
    }

    /// Open a live view of a board: subscribes the session to the board
    /// room and registers it in the presence map.
    pub fn open_board_view(
        &self,
        board: BoardId,
        user: UserId,
        session: SessionId,
    ) -> broadcast::Receiver<RealtimeEvent> {
        self.presence.join_board(board, user, session);
        self.bus.subscribe(Room::Board(board))
    }

    /// Close a live board view for one session.
    pub fn close_board_view(&self, board: BoardId, session: SessionId) {
        self.presence.leave_board(board, session);
        self.bus.cleanup_idle_rooms();
    }

    /// Drop a session from every board it was watching.
    pub fn disconnect(&self, session: SessionId) {
        self.presence.disconnect(session);
        self.bus.cleanup_idle_rooms();
    }

    pub(crate) async fn require_user(&self, id: UserId) -> Result<User> {
        self.users
            .get(id)
            .await
            .ok_or_else(|| Error::not_found("User not found"))
    }

    pub(crate) async fn require_board(&self, id: BoardId) -> Result<Board> {
        self.boards
            .get(id)
            .await
            .ok_or_else(|| Error::not_found("Board not found"))
    }

    pub(crate) fn publish(&self, room: Room, event: RealtimeEvent) {
        self.bus.publish(room, event);
    }

    /// Best-effort email delivery; a failure is logged, never propagated.
    pub(crate) fn email(&self, to: &str, content: EmailContent) {
        let delivery = self
            .notifier
            .send(to, &content.subject, &content.text, &content.html);
        if !delivery.success {
            tracing::warn!("[email] delivery to {} failed: {}", to, delivery.message);
        }
    }

    /// Display name for a user who may no longer exist, for emails and
    /// notification content.
    pub(crate) async fn display_name(&self, id: UserId) -> String {
        match self.users.get(id).await {
            Some(user) => user.name,
            None => "A former user".to_string(),
        }
    }
}
