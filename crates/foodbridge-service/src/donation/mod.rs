//! Donation publishing, reads, and lifecycle transitions.

pub mod input;
pub mod service;

pub use input::{CreateDonationInput, FoodItemInput};
pub use service::{DonationDetail, DonationService};
