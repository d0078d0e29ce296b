//! Volunteer-assignment domain events.

use serde::{Deserialize, Serialize};

use crate::types::id::{AssignmentId, DonationId};

/// Events related to a volunteer assignment's lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AssignmentEvent {
    /// A volunteer was assigned to a donation.
    Created {
        /// The assignment ID.
        assignment_id: AssignmentId,
        /// The donation being transported.
        donation_id: DonationId,
    },
    /// The assignment moved along its state graph.
    StatusChanged {
        /// The assignment ID.
        assignment_id: AssignmentId,
        /// The donation being transported.
        donation_id: DonationId,
        /// Previous status.
        from: String,
        /// New status.
        to: String,
    },
    /// The assigned volunteer reported where they are.
    VolunteerLocation {
        /// The assignment ID.
        assignment_id: AssignmentId,
        /// The donation being transported.
        donation_id: DonationId,
        /// Degrees north.
        latitude: f64,
        /// Degrees east.
        longitude: f64,
    },
}
