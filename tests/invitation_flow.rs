//! Invitation flow integration tests.

mod common;

use assert_matches::assert_matches;
use uuid::Uuid;

use collabboard::domain::{ParticipantRole, RequestStatus, Role};
use collabboard::realtime::EventName;
use collabboard::Error;

use common::{drain, TestEnv};

#[tokio::test]
async fn send_creates_request_notification_and_email() {
    let env = TestEnv::new();
    let alice = env.user("Alice", Role::Admin).await;
    let bea = env.user("Bea", Role::User).await;
    let board = env.board(&alice, "Roadmap").await;

    let mut bea_room = env.engine.join_user_room(bea.id);

    let invitation = env
        .engine
        .send_invitation(alice.id, board.id, &bea.email, "join us")
        .await
        .unwrap();

    assert_eq!(invitation.status, RequestStatus::Pending);
    assert_eq!(invitation.recipient, bea.id);

    // Bea sees one pending invitation and one unread notification.
    let pending = env.engine.pending_invitations_for_email(&bea.email).await;
    assert_eq!(pending.len(), 1);
    assert_eq!(env.engine.unread_count(bea.id).await, 1);

    // Her live session got a hint, and she got an email.
    let events = drain(&mut bea_room);
    assert!(events.iter().any(|e| e.name == EventName::MessageReceived));
    let emails = env.outbox.sent_to(&bea.email);
    assert_eq!(emails.len(), 1);
    assert!(emails[0].subject.contains("Roadmap"));
}

#[tokio::test]
async fn send_requires_board_owner() {
    let env = TestEnv::new();
    let alice = env.user("Alice", Role::Admin).await;
    let mallory = env.user("Mallory", Role::Admin).await;
    let bea = env.user("Bea", Role::User).await;
    let board = env.board(&alice, "Roadmap").await;

    let err = env
        .engine
        .send_invitation(mallory.id, board.id, &bea.email, "")
        .await
        .unwrap_err();
    assert_matches!(err, Error::Forbidden(_));
}

#[tokio::test]
async fn send_rejects_unknown_address_and_missing_board() {
    let env = TestEnv::new();
    let alice = env.user("Alice", Role::Admin).await;
    let board = env.board(&alice, "Roadmap").await;

    let err = env
        .engine
        .send_invitation(alice.id, board.id, "nobody@example.com", "")
        .await
        .unwrap_err();
    assert_matches!(err, Error::NotFound(_));

    let err = env
        .engine
        .send_invitation(alice.id, Uuid::new_v4(), "nobody@example.com", "")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Board not found");
}

#[tokio::test]
async fn admins_must_use_the_collaboration_flow() {
    let env = TestEnv::new();
    let alice = env.user("Alice", Role::Admin).await;
    let dana = env.user("Dana", Role::Admin).await;
    let board = env.board(&alice, "Roadmap").await;

    let err = env
        .engine
        .send_invitation(alice.id, board.id, &dana.email, "")
        .await
        .unwrap_err();
    assert_matches!(err, Error::InvalidRole(_));
}

#[tokio::test]
async fn duplicate_pending_invitation_conflicts_until_resolved() {
    let env = TestEnv::new();
    let alice = env.user("Alice", Role::Admin).await;
    let bea = env.user("Bea", Role::User).await;
    let board = env.board(&alice, "Roadmap").await;

    let first = env
        .engine
        .send_invitation(alice.id, board.id, &bea.email, "")
        .await
        .unwrap();

    let err = env
        .engine
        .send_invitation(alice.id, board.id, &bea.email, "")
        .await
        .unwrap_err();
    assert_matches!(err, Error::Conflict(_));

    // Once resolved, the pair is free again.
    env.engine
        .reject_invitation(bea.id, first.id, None)
        .await
        .unwrap();
    env.engine
        .send_invitation(alice.id, board.id, &bea.email, "second try")
        .await
        .unwrap();
}

#[tokio::test]
async fn inviting_an_existing_member_conflicts() {
    let env = TestEnv::new();
    let alice = env.user("Alice", Role::Admin).await;
    let bea = env.user("Bea", Role::User).await;
    let board = env.board(&alice, "Roadmap").await;

    let invitation = env
        .engine
        .send_invitation(alice.id, board.id, &bea.email, "")
        .await
        .unwrap();
    env.engine.accept_invitation(bea.id, invitation.id).await.unwrap();

    let err = env
        .engine
        .send_invitation(alice.id, board.id, &bea.email, "")
        .await
        .unwrap_err();
    assert_matches!(err, Error::Conflict(_));
}

#[tokio::test]
async fn accept_end_to_end() {
    let env = TestEnv::new();
    let alice = env.user("Alice", Role::Admin).await;
    let bea = env.user("Bea", Role::User).await;
    let board = env.board(&alice, "Board X").await;

    let invitation = env
        .engine
        .send_invitation(alice.id, board.id, &bea.email, "join us")
        .await
        .unwrap();

    // Subscriptions opened before the accept, as live clients would have.
    let mut bea_room = env.engine.join_user_room(bea.id);
    let mut alice_room = env.engine.join_user_room(alice.id);
    let mut board_room = env.engine.open_board_view(board.id, alice.id, Uuid::new_v4());

    let board_after = env
        .engine
        .accept_invitation(bea.id, invitation.id)
        .await
        .unwrap();

    // Bea is a member with exactly one participant entry, role member.
    assert!(board_after.is_member(bea.id));
    let entries: Vec<_> = board_after
        .participants
        .iter()
        .filter(|p| p.user == bea.id)
        .collect();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].role, ParticipantRole::Member);

    // The linked notification was updated in place.
    let messages = env.engine.messages_for(bea.id).await;
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].status, RequestStatus::Accepted);
    assert_eq!(messages[0].metadata.responded_by, Some(bea.id));

    // Fan-out: board room saw the participant, Bea's room saw the join.
    let board_events = drain(&mut board_room);
    assert!(board_events
        .iter()
        .any(|e| e.name == EventName::ParticipantAdded));
    let bea_events = drain(&mut bea_room);
    assert!(bea_events.iter().any(|e| e.name == EventName::BoardJoined));
    assert!(bea_events.iter().any(|e| e.name == EventName::MessageUpdated));
    let alice_events = drain(&mut alice_room);
    assert!(alice_events
        .iter()
        .any(|e| e.name == EventName::MessageUpdated));

    // The original sender was emailed about the acceptance.
    let emails = env.outbox.sent_to(&alice.email);
    assert_eq!(emails.len(), 1);
    assert!(emails[0].text.contains("Bea"));
}

#[tokio::test]
async fn accept_is_idempotent_guarded() {
    let env = TestEnv::new();
    let alice = env.user("Alice", Role::Admin).await;
    let bea = env.user("Bea", Role::User).await;
    let board = env.board(&alice, "Roadmap").await;

    let invitation = env
        .engine
        .send_invitation(alice.id, board.id, &bea.email, "")
        .await
        .unwrap();

    env.engine.accept_invitation(bea.id, invitation.id).await.unwrap();
    let err = env
        .engine
        .accept_invitation(bea.id, invitation.id)
        .await
        .unwrap_err();
    assert_matches!(err, Error::Conflict(_));
    assert_eq!(err.to_string(), "Invitation already processed");

    // Membership mutated exactly once.
    let board_after = env.engine.get_board(board.id).await.unwrap();
    assert_eq!(
        board_after.members.iter().filter(|m| **m == bea.id).count(),
        1
    );
    assert_eq!(
        board_after
            .participants
            .iter()
            .filter(|p| p.user == bea.id)
            .count(),
        1
    );
}

#[tokio::test]
async fn reject_records_reason_and_leaves_membership_alone() {
    let env = TestEnv::new();
    let alice = env.user("Alice", Role::Admin).await;
    let bea = env.user("Bea", Role::User).await;
    let board = env.board(&alice, "Roadmap").await;

    let invitation = env
        .engine
        .send_invitation(alice.id, board.id, &bea.email, "")
        .await
        .unwrap();

    env.engine
        .reject_invitation(bea.id, invitation.id, Some("too busy"))
        .await
        .unwrap();

    let board_after = env.engine.get_board(board.id).await.unwrap();
    assert!(!board_after.is_member(bea.id));

    let messages = env.engine.messages_for(bea.id).await;
    assert_eq!(messages[0].status, RequestStatus::Rejected);
    assert_eq!(messages[0].metadata.reason.as_deref(), Some("too busy"));

    // Terminal: accept after reject is refused.
    let err = env
        .engine
        .accept_invitation(bea.id, invitation.id)
        .await
        .unwrap_err();
    assert_matches!(err, Error::Conflict(_));
}
