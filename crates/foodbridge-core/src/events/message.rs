//! Direct-message domain events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::id::{DonationId, MessageId, UserId};

/// Events related to direct messages between users.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageEvent {
    /// A message was delivered to the recipient's inbox.
    Received {
        /// The stored message.
        message_id: MessageId,
        /// Who wrote it.
        sender_id: UserId,
        /// Donation the conversation is about, if any.
        donation_id: Option<DonationId>,
        /// Message text.
        content: String,
        /// When it was stored.
        sent_at: DateTime<Utc>,
    },
}
