//! Workflow Error Types
//!
//! Every operation of the workflow engine surfaces failures as a structured
//! [`Error`] with a stable [`ErrorKind`] and a human-readable message. None
//! of these crash the process; unexpected store failures are wrapped as
//! [`Error::Internal`] and logged with context at the call site.
//!
//! The explicitly best-effort side channels (email notifier, realtime
//! fan-out) never produce an `Error` at all - their failures are logged and
//! swallowed where they happen.

use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

/// Stable failure category, independent of the human-readable message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Board, user or request does not exist
    NotFound,
    /// Wrong role or wrong relationship to the resource
    Forbidden,
    /// Actor or target has a role incompatible with this flow
    InvalidRole,
    /// Duplicate pending request, already-member, already-processed request
    Conflict,
    /// Self-targeting or owner-targeting-self-removal
    InvalidState,
    /// Unexpected store failure
    Internal,
}

/// Workflow failure with a stable kind and a caller-facing message.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    InvalidRole(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    InvalidState(String),

    /// Unexpected failure from a storage backend. The in-process stores
    /// never produce this; a persistent store implementation wraps its
    /// driver errors here.
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn invalid_role(message: impl Into<String>) -> Self {
        Self::InvalidRole(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// The stable category for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Forbidden(_) => ErrorKind::Forbidden,
            Self::InvalidRole(_) => ErrorKind::InvalidRole,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::InvalidState(_) => ErrorKind::InvalidState,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// The caller-facing message.
    pub fn message(&self) -> &str {
        match self {
            Self::NotFound(m)
            | Self::Forbidden(m)
            | Self::InvalidRole(m)
            | Self::Conflict(m)
            | Self::InvalidState(m)
            | Self::Internal(m) => m,
        }
    }
}
