//! Domain events emitted by FoodBridge lifecycle operations.
//!
//! Events are published through the event sink after a transition or a
//! direct message has been committed, and are consumed by the real-time
//! hub. They carry plain identifiers and status strings so that this crate
//! stays independent of the entity models.

pub mod assignment;
pub mod donation;
pub mod message;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use assignment::AssignmentEvent;
pub use donation::DonationEvent;
pub use message::MessageEvent;

use crate::types::id::{NotificationId, UserId};

/// Wrapper for all domain events with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainEvent {
    /// Unique event ID.
    pub id: Uuid,
    /// When the event occurred.
    pub timestamp: DateTime<Utc>,
    /// The user who caused the event (if applicable).
    pub actor_id: Option<UserId>,
    /// The event payload.
    pub payload: EventPayload,
}

/// Union of all domain event types.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event", rename_all = "snake_case")]
pub enum EventPayload {
    /// A donation-related event.
    Donation(DonationEvent),
    /// A volunteer-assignment-related event.
    Assignment(AssignmentEvent),
    /// A direct-message event.
    Message(MessageEvent),
    /// A notification was stored for the recipient.
    Notification {
        /// The stored notification.
        notification_id: NotificationId,
        /// Notification title.
        title: String,
        /// Notification body.
        message: String,
    },
}

impl DomainEvent {
    /// Create a new domain event.
    pub fn new(actor_id: Option<UserId>, payload: EventPayload) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            actor_id,
            payload,
        }
    }

    /// Short event name used for logging and client-side routing.
    pub fn event_type(&self) -> &'static str {
        match &self.payload {
            EventPayload::Donation(DonationEvent::Created { .. }) => "donation.created",
            EventPayload::Donation(DonationEvent::StatusChanged { .. }) => "donation.status_changed",
            EventPayload::Assignment(AssignmentEvent::Created { .. }) => "assignment.created",
            EventPayload::Assignment(AssignmentEvent::StatusChanged { .. }) => {
                "assignment.status_changed"
            }
            EventPayload::Assignment(AssignmentEvent::VolunteerLocation { .. }) => {
                "assignment.volunteer_location"
            }
            EventPayload::Message(MessageEvent::Received { .. }) => "message.received",
            EventPayload::Notification { .. } => "notification.created",
        }
    }
}
