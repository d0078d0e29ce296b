//! Direct messages between users.

pub mod input;
pub mod service;

pub use input::SendMessageInput;
pub use service::MessageService;
