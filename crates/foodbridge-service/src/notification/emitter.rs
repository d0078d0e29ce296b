//! Best-effort notification emitter.

use std::sync::Arc;

use tracing::{debug, warn};

use foodbridge_core::events::{DomainEvent, EventPayload};
use foodbridge_core::types::id::UserId;
use foodbridge_database::NotificationStore;
use foodbridge_entity::notification::{NewNotification, Notification};

use crate::events::EventSink;

/// Appends notifications and pushes them to the recipient's live connections.
///
/// Emission happens after a transition has been committed, so a failure
/// here is logged and swallowed; it never undoes or fails the transition.
#[derive(Clone)]
pub struct NotificationEmitter {
    /// Notification persistence.
    store: Arc<dyn NotificationStore>,
    /// Real-time delivery.
    sink: Arc<dyn EventSink>,
}

impl std::fmt::Debug for NotificationEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationEmitter").finish_non_exhaustive()
    }
}

impl NotificationEmitter {
    /// Creates a new emitter.
    pub fn new(store: Arc<dyn NotificationStore>, sink: Arc<dyn EventSink>) -> Self {
        Self { store, sink }
    }

    /// Append one notification and publish it.
    ///
    /// Returns the stored notification, or `None` if the append failed.
    pub async fn emit(
        &self,
        actor_id: Option<UserId>,
        notice: NewNotification,
    ) -> Option<Notification> {
        let stored = match self.store.append(&notice).await {
            Ok(n) => n,
            Err(e) => {
                warn!(
                    user_id = %notice.user_id,
                    title = %notice.title,
                    error = %e,
                    "Failed to store notification"
                );
                return None;
            }
        };

        debug!(
            notification_id = %stored.id,
            user_id = %stored.user_id,
            "Notification stored"
        );

        self.sink.publish(
            stored.user_id,
            DomainEvent::new(
                actor_id,
                EventPayload::Notification {
                    notification_id: stored.id,
                    title: stored.title.clone(),
                    message: stored.message.clone(),
                },
            ),
        );

        Some(stored)
    }

    /// Append the same notice for every recipient.
    ///
    /// Returns how many notifications were stored.
    pub async fn emit_many(
        &self,
        actor_id: Option<UserId>,
        recipients: &[UserId],
        notice: impl Fn(UserId) -> NewNotification,
    ) -> usize {
        let mut stored = 0;
        for &recipient in recipients {
            if self.emit(actor_id, notice(recipient)).await.is_some() {
                stored += 1;
            }
        }
        stored
    }

    /// Publish a domain event to each recipient without storing anything.
    pub fn broadcast(&self, recipients: &[UserId], event: &DomainEvent) {
        for &recipient in recipients {
            self.sink.publish(recipient, event.clone());
        }
    }
}
