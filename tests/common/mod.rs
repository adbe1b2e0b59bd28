//! Shared fixtures for the workflow integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use tokio::sync::broadcast;

use collabboard::config::Config;
use collabboard::domain::{Board, Role, User};
use collabboard::notifier::{Delivery, EmailNotifier};
use collabboard::realtime::RealtimeEvent;
use collabboard::workflow::WorkflowEngine;

/// One email captured by the recording notifier.
#[derive(Debug, Clone)]
pub struct SentEmail {
    pub to: String,
    pub subject: String,
    pub text: String,
}

/// Notifier that records instead of sending.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<SentEmail>>,
}

impl RecordingNotifier {
    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_to(&self, to: &str) -> Vec<SentEmail> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.to == to)
            .cloned()
            .collect()
    }
}

impl EmailNotifier for RecordingNotifier {
    fn send(&self, to: &str, subject: &str, text: &str, _html: &str) -> Delivery {
        self.sent.lock().unwrap().push(SentEmail {
            to: to.to_string(),
            subject: subject.to_string(),
            text: text.to_string(),
        });
        Delivery::ok("recorded")
    }
}

/// Notifier whose every delivery fails, for best-effort tests.
pub struct FailingNotifier;

impl EmailNotifier for FailingNotifier {
    fn send(&self, _to: &str, _subject: &str, _text: &str, _html: &str) -> Delivery {
        Delivery::failed("smtp unreachable")
    }
}

/// Engine wired to a recording notifier.
pub struct TestEnv {
    pub engine: WorkflowEngine,
    pub outbox: Arc<RecordingNotifier>,
}

impl TestEnv {
    pub fn new() -> Self {
        let outbox = Arc::new(RecordingNotifier::default());
        let engine = WorkflowEngine::new(outbox.clone(), Config::default());
        Self { engine, outbox }
    }

    /// Engine whose notifier always fails.
    pub fn with_failing_notifier() -> WorkflowEngine {
        WorkflowEngine::new(Arc::new(FailingNotifier), Config::default())
    }

    /// Seed a user; the email address is derived from the name.
    pub async fn user(&self, name: &str, role: Role) -> User {
        let email = format!("{}@example.com", name.to_lowercase());
        let user = User::new(name, email, role);
        self.engine.users.insert(user.clone()).await;
        user
    }

    /// Seed a board owned by the given admin.
    pub async fn board(&self, owner: &User, title: &str) -> Board {
        self.engine
            .create_board(owner.id, title, "", None)
            .await
            .expect("owner should be allowed to create a board")
    }
}

/// Drain every event currently buffered on a subscription.
pub fn drain(rx: &mut broadcast::Receiver<RealtimeEvent>) -> Vec<RealtimeEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}
