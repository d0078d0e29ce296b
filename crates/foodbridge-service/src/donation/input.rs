//! Validated input for publishing a donation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use foodbridge_core::types::id::UserId;
use foodbridge_entity::donation::{NewDonation, NewFoodItem};

/// Fields a donor supplies when publishing a donation.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateDonationInput {
    /// Short title.
    #[validate(length(min = 3, message = "Title must be at least 3 characters"))]
    pub title: String,
    /// Free-text description.
    pub description: Option<String>,
    /// Total quantity offered.
    #[validate(range(exclusive_min = 0.0, message = "Quantity must be positive"))]
    pub quantity_total: f64,
    /// Unit for the total quantity.
    #[validate(length(min = 1, message = "Quantity unit is required"))]
    pub quantity_unit: String,
    /// When the food expires.
    pub expiry_time: DateTime<Utc>,
    /// Where the food is collected.
    #[validate(length(min = 1, message = "Pickup location is required"))]
    pub pickup_location: String,
    /// Pickup instructions.
    pub pickup_notes: Option<String>,
    /// Line items.
    #[serde(default)]
    #[validate(nested)]
    pub food_items: Vec<FoodItemInput>,
}

/// One line item of a donation.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FoodItemInput {
    /// Item name.
    #[validate(length(min = 1, message = "Item name is required"))]
    pub name: String,
    /// Category.
    #[validate(length(min = 1, message = "Item category is required"))]
    pub category: String,
    /// Quantity.
    #[validate(range(exclusive_min = 0.0, message = "Item quantity must be positive"))]
    pub quantity: f64,
    /// Unit.
    #[validate(length(min = 1, message = "Item quantity unit is required"))]
    pub quantity_unit: String,
    /// Dietary tags.
    #[serde(default)]
    pub dietary_info: Vec<String>,
    /// Allergen tags.
    #[serde(default)]
    pub allergens: Vec<String>,
}

impl CreateDonationInput {
    /// Convert into a store record owned by `donor_id`.
    pub fn into_new_donation(self, donor_id: UserId) -> NewDonation {
        NewDonation {
            donor_id,
            title: self.title,
            description: self.description,
            quantity_total: self.quantity_total,
            quantity_unit: self.quantity_unit,
            expiry_time: self.expiry_time,
            pickup_location: self.pickup_location,
            pickup_notes: self.pickup_notes,
            items: self
                .food_items
                .into_iter()
                .map(|item| NewFoodItem {
                    name: item.name,
                    category: item.category,
                    quantity: item.quantity,
                    quantity_unit: item.quantity_unit,
                    dietary_info: item.dietary_info,
                    allergens: item.allergens,
                })
                .collect(),
        }
    }
}
