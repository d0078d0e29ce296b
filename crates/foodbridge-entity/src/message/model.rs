//! Direct message entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use foodbridge_core::types::id::{DonationId, MessageId, UserId};

/// A message one user sent to another, optionally about a donation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DirectMessage {
    /// Unique message identifier.
    pub id: MessageId,
    /// Author.
    pub sender_id: UserId,
    /// Addressee.
    pub recipient_id: UserId,
    /// Donation the conversation is about.
    pub donation_id: Option<DonationId>,
    /// Message text.
    pub content: String,
    /// When the message was stored.
    pub created_at: DateTime<Utc>,
}

impl DirectMessage {
    /// Check if the user wrote or received this message.
    pub fn involves(&self, user_id: UserId) -> bool {
        self.sender_id == user_id || self.recipient_id == user_id
    }

    /// The other side of the conversation, seen from `user_id`.
    pub fn counterpart_of(&self, user_id: UserId) -> UserId {
        if self.sender_id == user_id {
            self.recipient_id
        } else {
            self.sender_id
        }
    }
}

/// Data required to store a message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMessage {
    /// Author.
    pub sender_id: UserId,
    /// Addressee.
    pub recipient_id: UserId,
    /// Related donation.
    pub donation_id: Option<DonationId>,
    /// Message text.
    pub content: String,
}

/// Optional filters for a user's message history.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MessageFilter {
    /// Only the conversation with this user.
    pub with_user: Option<UserId>,
    /// Only messages about this donation.
    pub donation_id: Option<DonationId>,
}

impl MessageFilter {
    /// Check whether a message in `viewer`'s history passes every set filter.
    pub fn matches(&self, viewer: UserId, message: &DirectMessage) -> bool {
        message.involves(viewer)
            && self
                .with_user
                .is_none_or(|u| message.counterpart_of(viewer) == u)
            && self
                .donation_id
                .is_none_or(|d| message.donation_id == Some(d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(sender_id: UserId, recipient_id: UserId) -> DirectMessage {
        DirectMessage {
            id: MessageId::new(),
            sender_id,
            recipient_id,
            donation_id: None,
            content: "Is the side door open?".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_filter_is_scoped_to_viewer() {
        let (alice, bob, carol) = (UserId::new(), UserId::new(), UserId::new());
        let msg = message(alice, bob);

        assert!(MessageFilter::default().matches(bob, &msg));
        assert!(!MessageFilter::default().matches(carol, &msg));

        let with_alice = MessageFilter {
            with_user: Some(alice),
            ..Default::default()
        };
        assert!(with_alice.matches(bob, &msg));
        assert!(!with_alice.matches(alice, &msg));
    }
}
