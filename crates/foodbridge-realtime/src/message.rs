//! WebSocket frames in both directions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use foodbridge_core::error::AppError;
use foodbridge_core::events::DomainEvent;
use foodbridge_core::types::id::{AssignmentId, DonationId, MessageId, UserId};

/// Messages sent by the client to the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundMessage {
    /// Send a direct message.
    SendMessage {
        /// Addressee.
        recipient_id: UserId,
        /// Message text.
        content: String,
        /// Donation the conversation is about.
        #[serde(default)]
        donation_id: Option<DonationId>,
    },
    /// Share the volunteer's current position for an assignment.
    UpdateVolunteerLocation {
        /// Assignment being delivered.
        assignment_id: AssignmentId,
        /// Degrees north.
        latitude: f64,
        /// Degrees east.
        longitude: f64,
    },
}

impl InboundMessage {
    /// Parse a JSON text frame.
    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

/// Messages sent by the server to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundMessage {
    /// Connection accepted and subscribed.
    Connected {
        /// Server time at subscription.
        timestamp: DateTime<Utc>,
    },
    /// A committed domain event.
    Event {
        /// Dotted event name, e.g. `donation.status_changed`.
        event_type: String,
        /// The event itself.
        event: DomainEvent,
    },
    /// The client fell behind and events were dropped.
    Lagged {
        /// Number of skipped events.
        skipped: u64,
    },
    /// A `send_message` frame was stored and delivered.
    MessageSent {
        /// The stored message.
        message_id: MessageId,
    },
    /// An inbound frame was rejected.
    Error {
        /// Machine-readable error code.
        code: String,
        /// Human-readable description.
        message: String,
    },
}

impl OutboundMessage {
    /// Wrap a domain event.
    pub fn event(event: DomainEvent) -> Self {
        Self::Event {
            event_type: event.event_type().to_string(),
            event,
        }
    }

    /// Report a failed inbound frame. Server-side details are not exposed.
    pub fn error(err: &AppError) -> Self {
        let message = if err.kind.is_internal() {
            "An internal error occurred".to_string()
        } else {
            err.message.clone()
        };
        Self::Error {
            code: err.kind.as_str().to_string(),
            message,
        }
    }

    /// Serialize to a JSON text frame.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}
