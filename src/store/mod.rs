//! In-Process Document Stores
//!
//! The persistent storage engine is an external collaborator; what the
//! workflow engine depends on are these document-store interfaces, realized
//! here in process behind `Arc<tokio::sync::RwLock<..>>`. Each store
//! performs its read-check-write sequences under a single write-lock
//! acquisition, which is what gives the engine its atomic
//! "add to set if absent" and "transition from pending" primitives.
//!
//! - [`boards::BoardStore`] - board documents with atomic membership mutation
//! - [`ledger::RequestLedger`] - the three request collections
//! - [`messages::MessageStore`] - notification records, locate-by-back-reference
//! - [`users::UserDirectory`] - identity and email resolution

pub mod boards;
pub mod ledger;
pub mod messages;
pub mod users;

pub use boards::BoardStore;
pub use ledger::{RequestLedger, Shard};
pub use messages::MessageStore;
pub use users::UserDirectory;
