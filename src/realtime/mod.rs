//! Real-Time Fan-Out
//!
//! Per-user and per-board broadcast rooms built on `tokio::sync::broadcast`.
//! Delivery is at-least-once, best-effort: an event is a hint that the
//! underlying record changed, never the record itself. Every correctness
//! property of the workflow engine holds with this module entirely
//! unsubscribed.

pub mod bus;
pub mod events;
pub mod presence;

pub use bus::RoomBus;
pub use events::{EventName, RealtimeEvent, Room};
pub use presence::{Presence, PresenceEntry};
