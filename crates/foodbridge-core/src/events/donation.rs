//! Donation-related domain events.

use serde::{Deserialize, Serialize};

use crate::types::id::DonationId;

/// Events related to a donation's lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DonationEvent {
    /// A donor published a new donation.
    Created {
        /// The donation ID.
        donation_id: DonationId,
        /// Donation title.
        title: String,
    },
    /// The donation moved along its state graph.
    StatusChanged {
        /// The donation ID.
        donation_id: DonationId,
        /// Previous status.
        from: String,
        /// New status.
        to: String,
    },
}
