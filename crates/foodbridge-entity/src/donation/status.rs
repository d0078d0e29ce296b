//! Donation status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a food donation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "donation_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DonationStatus {
    /// Published by the donor, waiting for an NGO.
    Pending,
    /// Claimed by an NGO.
    Accepted,
    /// Pickup has been scheduled.
    Scheduled,
    /// Food has been collected from the donor.
    Picked,
    /// Food has reached the NGO.
    Delivered,
    /// Declined by an NGO.
    Rejected,
    /// Withdrawn by the donor.
    Cancelled,
}

impl DonationStatus {
    /// All statuses in lifecycle order.
    pub const ALL: [Self; 7] = [
        Self::Pending,
        Self::Accepted,
        Self::Scheduled,
        Self::Picked,
        Self::Delivered,
        Self::Rejected,
        Self::Cancelled,
    ];

    /// Check if the donation is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Rejected | Self::Cancelled)
    }

    /// Check if a volunteer may be assigned while in this state.
    pub fn is_assignable(&self) -> bool {
        matches!(self, Self::Accepted | Self::Scheduled)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Scheduled => "scheduled",
            Self::Picked => "picked",
            Self::Delivered => "delivered",
            Self::Rejected => "rejected",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for DonationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DonationStatus {
    type Err = foodbridge_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                foodbridge_core::AppError::validation(format!("Invalid donation status: '{s}'"))
            })
    }
}
