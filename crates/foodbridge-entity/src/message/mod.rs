//! Direct messages between users.

pub mod model;

pub use model::{DirectMessage, MessageFilter, NewMessage};
