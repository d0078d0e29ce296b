//! Validated input for creating a volunteer assignment.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use foodbridge_core::types::id::{DonationId, UserId};

/// Fields a donor or NGO supplies when assigning a volunteer.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateAssignmentInput {
    /// Donation to deliver.
    pub donation_id: DonationId,
    /// Volunteer to assign.
    pub volunteer_id: UserId,
    /// Planned pickup time.
    pub pickup_time: DateTime<Utc>,
    /// Where to collect the food.
    #[validate(length(min = 1, message = "Pickup address is required"))]
    pub pickup_address: String,
    /// Where to deliver the food.
    #[validate(length(min = 1, message = "Dropoff address is required"))]
    pub dropoff_address: String,
    /// Instructions for the volunteer.
    pub notes: Option<String>,
}

/// A position fix reported by the assigned volunteer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate)]
pub struct LocationReport {
    /// Degrees north.
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be within ±90"))]
    pub latitude: f64,
    /// Degrees east.
    #[validate(range(min = -180.0, max = 180.0, message = "Longitude must be within ±180"))]
    pub longitude: f64,
}
