//! # foodbridge-api
//!
//! HTTP API layer for FoodBridge built on Axum.
//!
//! Provides the REST endpoints for donations, assignments and
//! notifications, the WebSocket event stream, middleware (CORS, request
//! logging, tracing), extractors, DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::serve;
pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
