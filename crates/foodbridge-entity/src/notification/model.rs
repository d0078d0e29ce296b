//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use foodbridge_core::types::id::{AssignmentId, DonationId, MessageId, NotificationId, UserId};

/// An in-app notification delivered to a user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notification {
    /// Unique notification identifier.
    pub id: NotificationId,
    /// Recipient.
    pub user_id: UserId,
    /// Short title.
    pub title: String,
    /// Message body.
    pub message: String,
    /// Type of the entity this refers to (`"donation"`, `"volunteer_assignment"`, `"message"`).
    pub related_entity_type: Option<String>,
    /// ID of the related entity.
    pub related_entity_id: Option<Uuid>,
    /// Whether the recipient has read it.
    pub is_read: bool,
    /// When the recipient read it.
    pub read_at: Option<DateTime<Utc>>,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
}

/// The entity a notification points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum RelatedEntity {
    /// A food donation.
    Donation(DonationId),
    /// A volunteer assignment.
    VolunteerAssignment(AssignmentId),
    /// A direct message.
    Message(MessageId),
}

impl RelatedEntity {
    /// Return the entity type string stored alongside the notification.
    pub fn entity_type(&self) -> &'static str {
        match self {
            Self::Donation(_) => "donation",
            Self::VolunteerAssignment(_) => "volunteer_assignment",
            Self::Message(_) => "message",
        }
    }

    /// Return the raw entity id.
    pub fn entity_id(&self) -> Uuid {
        match self {
            Self::Donation(id) => id.into_uuid(),
            Self::VolunteerAssignment(id) => id.into_uuid(),
            Self::Message(id) => id.into_uuid(),
        }
    }
}

/// Data required to append a notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewNotification {
    /// Recipient.
    pub user_id: UserId,
    /// Title.
    pub title: String,
    /// Message body.
    pub message: String,
    /// Related entity, if any.
    pub related: Option<RelatedEntity>,
}
