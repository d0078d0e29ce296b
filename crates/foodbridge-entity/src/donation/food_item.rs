//! Food item entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use foodbridge_core::types::id::{DonationId, FoodItemId};

/// One line item of a donation. Immutable once written.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FoodItem {
    /// Unique item identifier.
    pub id: FoodItemId,
    /// Parent donation.
    pub donation_id: DonationId,
    /// Item name.
    pub name: String,
    /// Category (e.g., `"produce"`, `"bakery"`).
    pub category: String,
    /// Quantity of this item.
    pub quantity: f64,
    /// Unit for `quantity`.
    pub quantity_unit: String,
    /// Dietary tags (e.g., `"vegan"`, `"halal"`).
    pub dietary_info: Vec<String>,
    /// Allergen tags.
    pub allergens: Vec<String>,
    /// When the item was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a food item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFoodItem {
    /// Item name.
    pub name: String,
    /// Category.
    pub category: String,
    /// Quantity.
    pub quantity: f64,
    /// Unit.
    pub quantity_unit: String,
    /// Dietary tags.
    pub dietary_info: Vec<String>,
    /// Allergen tags.
    pub allergens: Vec<String>,
}
