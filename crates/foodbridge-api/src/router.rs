//! Route definitions for the FoodBridge HTTP API.
//!
//! Resource routes are mounted under `/api`; the event stream lives at
//! `/ws`. The router receives `AppState` and passes it to all handlers via
//! Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, patch, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(donation_routes())
        .merge(assignment_routes())
        .merge(message_routes())
        .merge(notification_routes())
        .route("/health", get(handlers::health::health));

    let ws_routes = Router::new().route("/ws", get(handlers::ws::ws_upgrade));

    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .merge(ws_routes)
        .layer(DefaultBodyLimit::max(state.config.server.body_limit_bytes))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Donation publishing, reads and status changes
fn donation_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/donations",
            get(handlers::donation::list_donations).post(handlers::donation::create_donation),
        )
        .route("/donations/{id}", get(handlers::donation::get_donation))
        .route(
            "/donations/{id}/status",
            patch(handlers::donation::update_status),
        )
}

/// Volunteer assignments
fn assignment_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/assignments",
            get(handlers::assignment::list_assignments)
                .post(handlers::assignment::create_assignment),
        )
        .route(
            "/assignments/{id}/status",
            patch(handlers::assignment::update_status),
        )
        .route(
            "/assignments/{id}/location",
            post(handlers::assignment::report_location),
        )
}

/// Direct messages to and from the caller
fn message_routes() -> Router<AppState> {
    Router::new().route(
        "/messages",
        get(handlers::message::list_messages).post(handlers::message::send_message),
    )
}

/// The caller's notification inbox
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/notifications",
            get(handlers::notification::list_notifications),
        )
        .route(
            "/notifications/unread-count",
            get(handlers::notification::unread_count),
        )
        .route(
            "/notifications/read-all",
            put(handlers::notification::mark_all_read),
        )
        .route(
            "/notifications/{id}/read",
            put(handlers::notification::mark_read),
        )
}
