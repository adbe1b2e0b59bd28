//! CollabBoard - Membership-Request Workflow Engine
//!
//! CollabBoard lets users collaborate on shared boards whose membership
//! changes through three independent, asynchronous request flows:
//!
//! - **Invitation** - the board owner invites a user by email address
//! - **Join request** - a prospective member asks the board owner to join
//! - **Collaboration request** - an admin asks another admin to collaborate
//!   on one of their boards
//!
//! Each flow is a small state machine (`pending` -> `accepted` | `rejected`)
//! that mutates the shared board membership model on acceptance, keeps
//! exactly one notification record per request up to date as the lifecycle
//! advances, and broadcasts real-time hints to the interested rooms so open
//! client sessions refresh without polling. The data record is the source of
//! truth; the realtime event is only a hint to refresh.
//!
//! # Module Structure
//!
//! - **`domain`** - boards, users, the three request records, notifications
//! - **`store`** - in-process document stores: board membership, the request
//!   ledger, the notification store, and the user directory
//! - **`workflow`** - the engine orchestrating the stores, the notifier and
//!   the real-time bus under the shared invariants
//! - **`realtime`** - per-user / per-board broadcast rooms and the ephemeral
//!   presence map
//! - **`notifier`** - fire-and-forget email gateway and its templates
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use collabboard::config::Config;
//! use collabboard::notifier::LogNotifier;
//! use collabboard::workflow::WorkflowEngine;
//!
//! let engine = WorkflowEngine::new(Arc::new(LogNotifier), Config::from_env());
//! ```
//!
//! # Thread Safety
//!
//! All shared state is thread-safe: stores live behind
//! `Arc<tokio::sync::RwLock<..>>`, the realtime bus uses
//! `tokio::sync::broadcast` channels, and the engine itself is `Clone` and
//! cheap to hand to concurrent tasks.

pub mod config;
pub mod domain;
pub mod error;
pub mod notifier;
pub mod realtime;
pub mod store;
pub mod workflow;

pub use error::{Error, ErrorKind, Result};
