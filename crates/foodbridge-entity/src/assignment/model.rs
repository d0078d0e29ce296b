//! Volunteer assignment entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use foodbridge_core::types::id::{AssignmentId, DonationId, UserId};

use super::status::AssignmentStatus;
use crate::user::UserRole;

/// A volunteer's delivery task for one donation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct VolunteerAssignment {
    /// Unique assignment identifier.
    pub id: AssignmentId,
    /// Volunteer doing the delivery.
    pub volunteer_id: UserId,
    /// Donation being delivered.
    pub donation_id: DonationId,
    /// User who created the assignment.
    pub assigned_by_id: UserId,
    /// Role the assigner acted in (donor or NGO).
    pub assigned_by_role: UserRole,
    /// Current lifecycle status.
    pub status: AssignmentStatus,
    /// Where to collect the food.
    pub pickup_address: String,
    /// Where to deliver the food.
    pub dropoff_address: String,
    /// Planned pickup time.
    pub pickup_time: DateTime<Utc>,
    /// Actual drop-off time. Present iff the assignment is completed.
    pub dropoff_time: Option<DateTime<Utc>>,
    /// Instructions for the volunteer.
    pub notes: Option<String>,
    /// When `status` last changed.
    pub status_updated_at: DateTime<Utc>,
    /// When the assignment was created.
    pub created_at: DateTime<Utc>,
    /// When the assignment was last updated.
    pub updated_at: DateTime<Utc>,
}

impl VolunteerAssignment {
    /// Check if the user is the assigned volunteer.
    pub fn is_volunteer(&self, user_id: UserId) -> bool {
        self.volunteer_id == user_id
    }

    /// Check if the user created this assignment.
    pub fn is_assigner(&self, user_id: UserId) -> bool {
        self.assigned_by_id == user_id
    }
}

/// Data required to create a new assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAssignment {
    /// Donation to deliver.
    pub donation_id: DonationId,
    /// Volunteer to assign.
    pub volunteer_id: UserId,
    /// Assigner's user id.
    pub assigned_by_id: UserId,
    /// Assigner's role.
    pub assigned_by_role: UserRole,
    /// Pickup address.
    pub pickup_address: String,
    /// Drop-off address.
    pub dropoff_address: String,
    /// Planned pickup time.
    pub pickup_time: DateTime<Utc>,
    /// Instructions.
    pub notes: Option<String>,
}

/// Optional filters for listing assignments.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AssignmentFilter {
    /// Only assignments for this volunteer.
    pub volunteer_id: Option<UserId>,
    /// Only assignments for this donation.
    pub donation_id: Option<DonationId>,
    /// Only assignments in this status.
    pub status: Option<AssignmentStatus>,
}

impl AssignmentFilter {
    /// Check whether an assignment passes every set filter.
    pub fn matches(&self, assignment: &VolunteerAssignment) -> bool {
        self.volunteer_id.is_none_or(|v| assignment.volunteer_id == v)
            && self.donation_id.is_none_or(|d| assignment.donation_id == d)
            && self.status.is_none_or(|s| assignment.status == s)
    }
}
