//! Per-user in-memory pub/sub.

use dashmap::DashMap;
use tokio::sync::broadcast;
use tracing::{debug, trace};

use foodbridge_core::config::RealtimeConfig;
use foodbridge_core::events::DomainEvent;
use foodbridge_core::types::id::UserId;
use foodbridge_service::EventSink;

/// Fans domain events out to every live connection of a user.
///
/// A user's channel is created on first subscription and dropped once its
/// last receiver is released. Events for users with no channel are
/// discarded; nothing is buffered for offline users.
#[derive(Debug)]
pub struct RealtimeHub {
    /// User ID → broadcast sender shared by that user's connections.
    channels: DashMap<UserId, broadcast::Sender<DomainEvent>>,
    /// Buffer size for new channels.
    buffer_size: usize,
    /// When false, `publish` is a no-op.
    enabled: bool,
}

impl RealtimeHub {
    /// Creates a hub from the realtime configuration section.
    pub fn new(config: &RealtimeConfig) -> Self {
        Self {
            channels: DashMap::new(),
            buffer_size: config.channel_buffer_size.max(1),
            enabled: config.enabled,
        }
    }

    /// Subscribe to a user's events.
    pub fn subscribe(&self, user_id: UserId) -> broadcast::Receiver<DomainEvent> {
        let rx = self
            .channels
            .entry(user_id)
            .or_insert_with(|| broadcast::channel(self.buffer_size).0)
            .subscribe();
        debug!(user_id = %user_id, "Realtime subscription opened");
        rx
    }

    /// Drop the user's channel if no receivers remain.
    ///
    /// Call after a connection's receiver has been dropped.
    pub fn release(&self, user_id: UserId) {
        let removed = self
            .channels
            .remove_if(&user_id, |_, tx| tx.receiver_count() == 0)
            .is_some();
        if removed {
            debug!(user_id = %user_id, "Realtime channel released");
        }
    }

    /// Number of live receivers for a user.
    pub fn connection_count(&self, user_id: UserId) -> usize {
        self.channels
            .get(&user_id)
            .map(|tx| tx.receiver_count())
            .unwrap_or(0)
    }

    /// Number of users with at least one open channel.
    pub fn user_count(&self) -> usize {
        self.channels.len()
    }
}

impl EventSink for RealtimeHub {
    fn publish(&self, recipient: UserId, event: DomainEvent) {
        if !self.enabled {
            return;
        }
        let Some(tx) = self.channels.get(&recipient) else {
            trace!(user_id = %recipient, event_type = event.event_type(), "No live connection");
            return;
        };
        // A send error only means every receiver has gone away.
        let _ = tx.send(event);
    }
}
