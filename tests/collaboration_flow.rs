//! Collaboration flow integration tests: admin-to-admin board sharing.

mod common;

use assert_matches::assert_matches;

use collabboard::domain::{ParticipantRole, RequestStatus, Role};
use collabboard::realtime::EventName;
use collabboard::Error;

use common::{drain, TestEnv};

#[tokio::test]
async fn send_is_gated_on_both_roles() {
    let env = TestEnv::new();
    let alice = env.user("Alice", Role::Admin).await;
    let bea = env.user("Bea", Role::User).await;
    let board = env.board(&alice, "Roadmap").await;

    // A regular user cannot open the flow at all.
    let err = env
        .engine
        .send_collaboration_request(bea.id, board.id, "")
        .await
        .unwrap_err();
    assert_matches!(err, Error::Forbidden(_));
    assert_eq!(
        err.to_string(),
        "Only admin users can send collaboration requests"
    );

    // And an admin cannot target their own board.
    let err = env
        .engine
        .send_collaboration_request(alice.id, board.id, "")
        .await
        .unwrap_err();
    assert_matches!(err, Error::InvalidState(_));
}

#[tokio::test]
async fn send_notifies_the_owner_and_tracks_both_sides() {
    let env = TestEnv::new();
    let alice = env.user("Alice", Role::Admin).await;
    let dana = env.user("Dana", Role::Admin).await;
    let board = env.board(&alice, "Design System").await;

    let mut alice_room = env.engine.join_user_room(alice.id);

    let request = env
        .engine
        .send_collaboration_request(dana.id, board.id, "let's share this")
        .await
        .unwrap();
    assert_eq!(request.status, RequestStatus::Pending);
    assert_eq!(request.board_owner, alice.id);

    // Owner-side view: incoming queue, per-board queue, notification, email.
    let incoming = env.engine.collaboration_requests_for_owner(alice.id).await;
    assert_eq!(incoming.len(), 1);
    let per_board = env
        .engine
        .collaboration_requests_for_board(alice.id, board.id)
        .await
        .unwrap();
    assert_eq!(per_board.len(), 1);
    assert_eq!(env.engine.unread_count(alice.id).await, 1);
    assert_eq!(env.outbox.sent_to(&alice.email).len(), 1);
    let events = drain(&mut alice_room);
    assert!(events.iter().any(|e| e.name == EventName::MessageReceived));

    // Requester-side view: sent list regardless of status.
    let sent = env.engine.sent_collaboration_requests(dana.id).await;
    assert_eq!(sent.len(), 1);
}

#[tokio::test]
async fn duplicate_pending_request_conflicts() {
    let env = TestEnv::new();
    let alice = env.user("Alice", Role::Admin).await;
    let dana = env.user("Dana", Role::Admin).await;
    let board = env.board(&alice, "Roadmap").await;

    env.engine
        .send_collaboration_request(dana.id, board.id, "")
        .await
        .unwrap();
    let err = env
        .engine
        .send_collaboration_request(dana.id, board.id, "")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Collaboration request already pending");
}

#[tokio::test]
async fn accept_end_to_end_joins_as_plain_member() {
    let env = TestEnv::new();
    let alice = env.user("Alice", Role::Admin).await;
    let dana = env.user("Dana", Role::Admin).await;
    let board = env.board(&alice, "Design System").await;

    let request = env
        .engine
        .send_collaboration_request(dana.id, board.id, "")
        .await
        .unwrap();

    let mut dana_room = env.engine.join_user_room(dana.id);

    let board_after = env
        .engine
        .accept_collaboration_request(alice.id, request.id)
        .await
        .unwrap();

    // Admin account, member seat: the role does not travel with them.
    assert!(board_after.is_member(dana.id));
    let participant = board_after.participant(dana.id).unwrap();
    assert_eq!(participant.role, ParticipantRole::Member);

    let dana_events = drain(&mut dana_room);
    assert!(dana_events.iter().any(|e| e.name == EventName::BoardJoined));
    assert!(dana_events
        .iter()
        .any(|e| e.name == EventName::MessageUpdated));

    // Acceptance email goes back to the requester.
    assert_eq!(env.outbox.sent_to(&dana.email).len(), 1);

    // The owner's incoming queue drains and Dana's sent list keeps the
    // resolved entry.
    assert!(env
        .engine
        .collaboration_requests_for_owner(alice.id)
        .await
        .is_empty());
    let sent = env.engine.sent_collaboration_requests(dana.id).await;
    assert_eq!(sent[0].status, RequestStatus::Accepted);
}

#[tokio::test]
async fn accept_and_reject_are_owner_only() {
    let env = TestEnv::new();
    let alice = env.user("Alice", Role::Admin).await;
    let dana = env.user("Dana", Role::Admin).await;
    let eve = env.user("Eve", Role::Admin).await;
    let board = env.board(&alice, "Roadmap").await;

    let request = env
        .engine
        .send_collaboration_request(dana.id, board.id, "")
        .await
        .unwrap();

    let err = env
        .engine
        .accept_collaboration_request(eve.id, request.id)
        .await
        .unwrap_err();
    assert_matches!(err, Error::Forbidden(_));
    let err = env
        .engine
        .reject_collaboration_request(eve.id, request.id, None)
        .await
        .unwrap_err();
    assert_matches!(err, Error::Forbidden(_));

    // The request is untouched by the failed attempts.
    let sent = env.engine.sent_collaboration_requests(dana.id).await;
    assert_eq!(sent[0].status, RequestStatus::Pending);
}

#[tokio::test]
async fn reject_then_accept_is_refused() {
    let env = TestEnv::new();
    let alice = env.user("Alice", Role::Admin).await;
    let dana = env.user("Dana", Role::Admin).await;
    let board = env.board(&alice, "Roadmap").await;

    let request = env
        .engine
        .send_collaboration_request(dana.id, board.id, "")
        .await
        .unwrap();

    env.engine
        .reject_collaboration_request(alice.id, request.id, Some("different direction"))
        .await
        .unwrap();

    let err = env
        .engine
        .accept_collaboration_request(alice.id, request.id)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Collaboration request already processed");

    let board_after = env.engine.get_board(board.id).await.unwrap();
    assert!(!board_after.is_member(dana.id));

    let emails = env.outbox.sent_to(&dana.email);
    assert_eq!(emails.len(), 1);
    assert!(emails[0].text.contains("different direction"));
}

#[tokio::test]
async fn rejection_with_reason_frees_the_pair_for_a_new_request() {
    let env = TestEnv::new();
    let dana = env.user("Dana", Role::Admin).await;
    let carl = env.user("Carl", Role::Admin).await;
    let board = env.board(&dana, "Board Y").await;

    let request = env
        .engine
        .send_collaboration_request(carl.id, board.id, "")
        .await
        .unwrap();
    let err = env
        .engine
        .send_collaboration_request(carl.id, board.id, "")
        .await
        .unwrap_err();
    assert_matches!(err, Error::Conflict(_));

    env.engine
        .reject_collaboration_request(dana.id, request.id, Some("not now"))
        .await
        .unwrap();

    let messages = env.engine.messages_for(dana.id).await;
    assert_eq!(messages[0].status, RequestStatus::Rejected);
    assert_eq!(messages[0].metadata.reason.as_deref(), Some("not now"));

    // The pending slot is free again.
    env.engine
        .send_collaboration_request(carl.id, board.id, "second attempt")
        .await
        .unwrap();
}

#[tokio::test]
async fn user_owned_boards_are_out_of_scope() {
    let env = TestEnv::new();
    let alice = env.user("Alice", Role::Admin).await;
    let dana = env.user("Dana", Role::Admin).await;
    let bea = env.user("Bea", Role::User).await;
    let board = env.board(&alice, "Roadmap").await;

    // Hand the board to a regular user to simulate a user-owned board.
    let mut downgraded = board.clone();
    downgraded.owner = bea.id;
    env.engine.boards.insert(downgraded).await;

    let err = env
        .engine
        .send_collaboration_request(dana.id, board.id, "")
        .await
        .unwrap_err();
    assert_matches!(err, Error::InvalidRole(_));
    assert_eq!(
        err.to_string(),
        "Can only collaborate with admin-owned boards"
    );
}
