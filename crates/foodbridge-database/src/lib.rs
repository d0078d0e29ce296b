//! # foodbridge-database
//!
//! Persistence for FoodBridge: the store traits consumed by the service
//! layer, PostgreSQL repositories implementing them with conditional
//! updates, and an in-memory store with the same semantics.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;
pub mod stores;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use store::{
    AssignmentStore, DonationStore, MessageStore, NotificationStore, UserDirectory,
};
pub use stores::Stores;
