//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use foodbridge_auth::JwtDecoder;
use foodbridge_core::config::AppConfig;
use foodbridge_database::Stores;
use foodbridge_realtime::{InboundDispatcher, RealtimeHub};
use foodbridge_service::{
    AssignmentService, DonationService, EventSink, MessageService, NotificationEmitter,
    NotificationService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// JWT token decoder and validator
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Per-user event hub
    pub realtime: Arc<RealtimeHub>,
    /// Donation lifecycle service
    pub donation_service: Arc<DonationService>,
    /// Assignment lifecycle service
    pub assignment_service: Arc<AssignmentService>,
    /// Direct message service
    pub message_service: Arc<MessageService>,
    /// Notification service
    pub notification_service: Arc<NotificationService>,
    /// Handler for frames sent by WebSocket clients
    pub inbound: Arc<InboundDispatcher>,
    /// Process start, for uptime reporting
    pub started_at: Instant,
}

impl AppState {
    /// Wire the services over the given stores.
    ///
    /// The realtime hub is both the services' event sink and the source
    /// WebSocket sessions subscribe to.
    pub fn new(config: AppConfig, stores: Stores) -> Self {
        let realtime = Arc::new(RealtimeHub::new(&config.realtime));
        let emitter = NotificationEmitter::new(
            stores.notifications.clone(),
            realtime.clone() as Arc<dyn EventSink>,
        );

        let donation_service = Arc::new(DonationService::new(
            stores.donations.clone(),
            stores.assignments.clone(),
            stores.users.clone(),
            emitter.clone(),
        ));
        let assignment_service = Arc::new(AssignmentService::new(
            stores.assignments,
            stores.donations.clone(),
            stores.users.clone(),
            emitter.clone(),
        ));
        let message_service = Arc::new(MessageService::new(
            stores.messages,
            stores.donations,
            stores.users,
            emitter,
        ));
        let notification_service = Arc::new(NotificationService::new(stores.notifications));
        let inbound = Arc::new(InboundDispatcher::new(
            message_service.clone(),
            assignment_service.clone(),
        ));

        Self {
            jwt_decoder: Arc::new(JwtDecoder::new(&config.auth)),
            config: Arc::new(config),
            realtime,
            donation_service,
            assignment_service,
            message_service,
            notification_service,
            inbound,
            started_at: Instant::now(),
        }
    }
}
