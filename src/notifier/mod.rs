//! Email Notifier Gateway
//!
//! Fire-and-forget external collaborator: the engine hands a recipient
//! address and templated content to [`EmailNotifier::send`] after the
//! authoritative state mutation has committed. A failed delivery is
//! reported in the returned [`Delivery`] and logged by the caller; it never
//! propagates an error and never rolls back the mutation.

pub mod templates;

/// Outcome of one delivery attempt.
#[derive(Debug, Clone)]
pub struct Delivery {
    pub success: bool,
    pub message: String,
}

impl Delivery {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Gateway to whatever actually delivers mail. Implementations must not
/// panic and must not block on retries; the engine treats every send as
/// best-effort.
pub trait EmailNotifier: Send + Sync {
    fn send(&self, to: &str, subject: &str, text: &str, html: &str) -> Delivery;
}

/// Development notifier: logs the email instead of sending it.
pub struct LogNotifier;

impl EmailNotifier for LogNotifier {
    fn send(&self, to: &str, subject: &str, text: &str, _html: &str) -> Delivery {
        tracing::info!("[email] to={} subject={:?} body={:?}", to, subject, text);
        Delivery::ok("email logged (not sent in development)")
    }
}
