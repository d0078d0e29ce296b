//! Donation entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use foodbridge_core::types::id::{DonationId, UserId};

use super::food_item::NewFoodItem;
use super::status::DonationStatus;

/// A surplus-food donation published by a donor.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Donation {
    /// Unique donation identifier.
    pub id: DonationId,
    /// Donor who owns the donation. Never changes.
    pub donor_id: UserId,
    /// NGO that claimed the donation. Set once, on acceptance.
    pub ngo_id: Option<UserId>,
    /// Short title.
    pub title: String,
    /// Free-text description.
    pub description: Option<String>,
    /// Total quantity offered.
    pub quantity_total: f64,
    /// Unit for `quantity_total` (e.g., `"kg"`, `"meals"`).
    pub quantity_unit: String,
    /// When the food stops being safe to distribute.
    pub expiry_time: DateTime<Utc>,
    /// Where the food is collected.
    pub pickup_location: String,
    /// Extra pickup instructions.
    pub pickup_notes: Option<String>,
    /// Current lifecycle status.
    pub status: DonationStatus,
    /// When `status` last changed.
    pub status_updated_at: DateTime<Utc>,
    /// When the donation was created.
    pub created_at: DateTime<Utc>,
    /// When the donation was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Donation {
    /// Check if the user is the owning donor.
    pub fn is_donor(&self, user_id: UserId) -> bool {
        self.donor_id == user_id
    }

    /// Check if the user is the NGO that claimed this donation.
    pub fn is_linked_ngo(&self, user_id: UserId) -> bool {
        self.ngo_id == Some(user_id)
    }
}

/// Data required to create a new donation together with its items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDonation {
    /// Owning donor.
    pub donor_id: UserId,
    /// Short title.
    pub title: String,
    /// Free-text description.
    pub description: Option<String>,
    /// Total quantity offered.
    pub quantity_total: f64,
    /// Unit for the total quantity.
    pub quantity_unit: String,
    /// Expiry time.
    pub expiry_time: DateTime<Utc>,
    /// Pickup location.
    pub pickup_location: String,
    /// Pickup instructions.
    pub pickup_notes: Option<String>,
    /// Food items, written in the same atomic step as the donation.
    pub items: Vec<NewFoodItem>,
}

/// Optional filters for listing donations.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DonationFilter {
    /// Only donations in this status.
    pub status: Option<DonationStatus>,
    /// Only donations owned by this donor.
    pub donor_id: Option<UserId>,
    /// Only donations claimed by this NGO.
    pub ngo_id: Option<UserId>,
}

impl DonationFilter {
    /// Check whether a donation passes every set filter.
    pub fn matches(&self, donation: &Donation) -> bool {
        self.status.is_none_or(|s| donation.status == s)
            && self.donor_id.is_none_or(|d| donation.donor_id == d)
            && self.ngo_id.is_none_or(|n| donation.ngo_id == Some(n))
    }
}
