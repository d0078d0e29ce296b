//! HTTP and WebSocket handlers, grouped by resource.

pub mod assignment;
pub mod donation;
pub mod health;
pub mod message;
pub mod notification;
pub mod ws;
