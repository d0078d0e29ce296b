//! Notification emission and the owner-facing notification API.

pub mod emitter;
pub mod messages;
pub mod service;

pub use emitter::NotificationEmitter;
pub use service::NotificationService;
