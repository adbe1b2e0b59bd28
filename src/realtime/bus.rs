//! Per-room event broadcasting.
//!
//! Each room gets its own `tokio::sync::broadcast` channel, created lazily
//! on first subscribe or publish. Publishing to a room nobody watches is
//! not an error - the store record is the source of truth and the event is
//! only a hint to refresh.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::broadcast;

use super::events::{RealtimeEvent, Room};

#[derive(Clone)]
pub struct RoomBus {
    channels: Arc<Mutex<HashMap<Room, broadcast::Sender<RealtimeEvent>>>>,
    capacity: usize,
}

impl RoomBus {
    pub fn new(capacity: usize) -> Self {
        Self {
            channels: Arc::new(Mutex::new(HashMap::new())),
            capacity,
        }
    }

    fn sender(&self, room: Room) -> broadcast::Sender<RealtimeEvent> {
        let mut channels = self.channels.lock().unwrap();
        channels
            .entry(room)
            .or_insert_with(|| broadcast::channel(self.capacity).0)
            .clone()
    }

    /// Subscribe a session to a room, creating the room if needed.
    pub fn subscribe(&self, room: Room) -> broadcast::Receiver<RealtimeEvent> {
        self.sender(room).subscribe()
    }

    /// Deliver an event to every session currently subscribed to the room.
    ///
    /// Returns the number of live subscribers that received it (0 when the
    /// room is empty). Only `subscribe` creates channels; publishing to a
    /// room nobody has joined allocates nothing.
    pub fn publish(&self, room: Room, event: RealtimeEvent) -> usize {
        let name = event.name.as_str();
        let sender = self.channels.lock().unwrap().get(&room).cloned();
        let Some(sender) = sender else {
            tracing::trace!("[realtime] {} -> {} (no subscribers)", name, room);
            return 0;
        };
        match sender.send(event) {
            Ok(subscriber_count) => {
                tracing::debug!("[realtime] {} -> {} ({} subscribers)", name, room, subscriber_count);
                subscriber_count
            }
            Err(_) => {
                // No subscribers, that's okay.
                tracing::trace!("[realtime] {} -> {} (no subscribers)", name, room);
                0
            }
        }
    }

    /// Number of live subscribers in a room.
    pub fn subscriber_count(&self, room: Room) -> usize {
        self.channels
            .lock()
            .unwrap()
            .get(&room)
            .map(|s| s.receiver_count())
            .unwrap_or(0)
    }

    /// Drop channels whose last subscriber has gone away.
    pub fn cleanup_idle_rooms(&self) {
        self.channels
            .lock()
            .unwrap()
            .retain(|_, sender| sender.receiver_count() > 0);
    }
}
