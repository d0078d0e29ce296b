//! # foodbridge-realtime
//!
//! Per-user broadcast channels for committed lifecycle events. The hub is
//! the production [`EventSink`](foodbridge_service::EventSink); WebSocket
//! sessions subscribe to their user's channel and forward what arrives,
//! and hand their inbound frames to the [`InboundDispatcher`].

pub mod hub;
pub mod inbound;
pub mod message;

pub use hub::RealtimeHub;
pub use inbound::InboundDispatcher;
pub use message::{InboundMessage, OutboundMessage};
