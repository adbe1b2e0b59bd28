//! Rooms and the realtime event catalog.
//!
//! Clients join `user-<selfId>` on session start and `board-<id>` while a
//! board view is open. Payloads carry the essentials a client needs to
//! decide whether to refresh; they are not authoritative state.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{
    Board, BoardId, Message, Participant, RequestId, RequestKind, RequestStatus, User, UserId,
};

/// A broadcast group, either per-user or per-board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Room {
    User(UserId),
    Board(BoardId),
}

impl std::fmt::Display for Room {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Room::User(id) => write!(f, "user-{id}"),
            Room::Board(id) => write!(f, "board-{id}"),
        }
    }
}

/// Event names delivered to rooms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventName {
    #[serde(rename = "participant:added")]
    ParticipantAdded,
    #[serde(rename = "participant:removed")]
    ParticipantRemoved,
    #[serde(rename = "request:updated")]
    RequestUpdated,
    #[serde(rename = "board:created")]
    BoardCreated,
    #[serde(rename = "board:deleted")]
    BoardDeleted,
    #[serde(rename = "board:joined")]
    BoardJoined,
    #[serde(rename = "board:removed")]
    BoardRemoved,
    #[serde(rename = "message:updated")]
    MessageUpdated,
    #[serde(rename = "message:received")]
    MessageReceived,
}

impl EventName {
    pub fn as_str(self) -> &'static str {
        match self {
            EventName::ParticipantAdded => "participant:added",
            EventName::ParticipantRemoved => "participant:removed",
            EventName::RequestUpdated => "request:updated",
            EventName::BoardCreated => "board:created",
            EventName::BoardDeleted => "board:deleted",
            EventName::BoardJoined => "board:joined",
            EventName::BoardRemoved => "board:removed",
            EventName::MessageUpdated => "message:updated",
            EventName::MessageReceived => "message:received",
        }
    }
}

/// One event as delivered to every session subscribed to a room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeEvent {
    pub name: EventName,
    pub payload: serde_json::Value,
}

impl RealtimeEvent {
    pub fn new(name: EventName, payload: serde_json::Value) -> Self {
        Self { name, payload }
    }

    /// `participant:added` for the board room.
    pub fn participant_added(participant: &Participant, user: &User) -> Self {
        Self::new(
            EventName::ParticipantAdded,
            json!({
                "participant": {
                    "user": { "id": user.id, "name": user.name, "email": user.email },
                    "role": participant.role,
                    "joinedAt": participant.joined_at,
                }
            }),
        )
    }

    /// `participant:removed` for the board room.
    pub fn participant_removed(user: UserId) -> Self {
        Self::new(EventName::ParticipantRemoved, json!({ "userId": user }))
    }

    /// `request:updated` for the board room, refreshing pending-request
    /// badges in open board views.
    pub fn request_updated(request: RequestId, kind: RequestKind, status: RequestStatus) -> Self {
        Self::new(
            EventName::RequestUpdated,
            json!({ "requestId": request, "type": kind, "status": status }),
        )
    }

    /// `board:created` for a member's user room.
    pub fn board_created(board: BoardId, user: UserId) -> Self {
        Self::new(
            EventName::BoardCreated,
            json!({ "boardId": board, "userId": user }),
        )
    }

    /// `board:deleted` for a member's user room.
    pub fn board_deleted(board: BoardId, user: UserId) -> Self {
        Self::new(
            EventName::BoardDeleted,
            json!({ "boardId": board, "userId": user }),
        )
    }

    /// `board:joined` for the new member's user room.
    pub fn board_joined(board: &Board) -> Self {
        Self::new(
            EventName::BoardJoined,
            json!({
                "board": {
                    "id": board.id,
                    "title": board.title,
                    "description": board.description,
                }
            }),
        )
    }

    /// `board:removed` for the removed member's user room.
    pub fn board_removed(board: BoardId, user: UserId) -> Self {
        Self::new(
            EventName::BoardRemoved,
            json!({ "boardId": board, "userId": user }),
        )
    }

    /// `message:updated` for a party's user room; `message_id` is the
    /// originating request id, which is how clients correlate the update
    /// with the notification they already hold.
    pub fn message_updated(request: RequestId, kind: RequestKind, status: RequestStatus) -> Self {
        Self::new(
            EventName::MessageUpdated,
            json!({ "messageId": request, "type": kind, "status": status }),
        )
    }

    /// `message:received` for the recipient's user room, carrying the fresh
    /// notification record.
    pub fn message_received(message: &Message) -> Self {
        Self::new(EventName::MessageReceived, json!({ "message": message }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn room_names_follow_the_catalog() {
        let id = Uuid::new_v4();
        assert_eq!(Room::User(id).to_string(), format!("user-{id}"));
        assert_eq!(Room::Board(id).to_string(), format!("board-{id}"));
    }

    #[test]
    fn event_names_serialize_with_colon() {
        assert_eq!(
            serde_json::to_string(&EventName::ParticipantAdded).unwrap(),
            "\"participant:added\""
        );
        assert_eq!(EventName::MessageUpdated.as_str(), "message:updated");
    }

    #[test]
    fn message_updated_payload_carries_request_id() {
        let request = Uuid::new_v4();
        let event =
            RealtimeEvent::message_updated(request, RequestKind::Invitation, RequestStatus::Accepted);
        assert_eq!(event.payload["messageId"], json!(request));
        assert_eq!(event.payload["type"], json!("invitation"));
        assert_eq!(event.payload["status"], json!("accepted"));
    }
}
