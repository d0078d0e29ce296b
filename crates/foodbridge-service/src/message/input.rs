//! Validated input for sending a direct message.

use serde::{Deserialize, Serialize};
use validator::Validate;

use foodbridge_core::types::id::{DonationId, UserId};

/// A message the acting user wants to send.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendMessageInput {
    /// Addressee.
    pub recipient_id: UserId,
    /// Message text.
    #[validate(length(min = 1, max = 2000, message = "Message must be 1 to 2000 characters"))]
    pub content: String,
    /// Donation the conversation is about.
    pub donation_id: Option<DonationId>,
}
