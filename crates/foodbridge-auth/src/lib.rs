//! # foodbridge-auth
//!
//! Token handling for FoodBridge. Users authenticate with an external
//! identity system; this crate only verifies the HS256 bearer tokens it
//! issues (and mints development tokens for the CLI).
//!
//! ## Modules
//!
//! - `jwt`: claims, token encoding and verification

pub mod jwt;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
