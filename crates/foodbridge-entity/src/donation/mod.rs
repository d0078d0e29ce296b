//! Food donation entities.

pub mod food_item;
pub mod model;
pub mod status;

pub use food_item::{FoodItem, NewFoodItem};
pub use model::{Donation, DonationFilter, NewDonation};
pub use status::DonationStatus;
