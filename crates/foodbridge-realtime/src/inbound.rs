//! Dispatch of client frames to the services.

use std::sync::Arc;

use tracing::debug;

use foodbridge_service::assignment::LocationReport;
use foodbridge_service::message::SendMessageInput;
use foodbridge_service::{AssignmentService, MessageService, RequestContext};

use crate::message::{InboundMessage, OutboundMessage};

/// Turns inbound WebSocket frames into service calls on behalf of the
/// connected user.
#[derive(Debug, Clone)]
pub struct InboundDispatcher {
    messages: Arc<MessageService>,
    assignments: Arc<AssignmentService>,
}

impl InboundDispatcher {
    /// Creates a dispatcher over the given services.
    pub fn new(messages: Arc<MessageService>, assignments: Arc<AssignmentService>) -> Self {
        Self {
            messages,
            assignments,
        }
    }

    /// Handle one text frame. Returns the frame to send back, if any.
    pub async fn handle(&self, ctx: &RequestContext, raw: &str) -> Option<OutboundMessage> {
        let frame = match InboundMessage::parse(raw) {
            Ok(frame) => frame,
            Err(e) => {
                return Some(OutboundMessage::Error {
                    code: "INVALID_MESSAGE".to_string(),
                    message: format!("Failed to parse message: {e}"),
                });
            }
        };

        let result = match frame {
            InboundMessage::SendMessage {
                recipient_id,
                content,
                donation_id,
            } => self
                .messages
                .send_message(
                    ctx,
                    SendMessageInput {
                        recipient_id,
                        content,
                        donation_id,
                    },
                )
                .await
                .map(|message| {
                    Some(OutboundMessage::MessageSent {
                        message_id: message.id,
                    })
                }),
            InboundMessage::UpdateVolunteerLocation {
                assignment_id,
                latitude,
                longitude,
            } => self
                .assignments
                .report_location(
                    ctx,
                    assignment_id,
                    LocationReport {
                        latitude,
                        longitude,
                    },
                )
                .await
                .map(|()| None),
        };

        result.unwrap_or_else(|e| {
            debug!(user_id = %ctx.user_id, error = %e, "Inbound frame rejected");
            Some(OutboundMessage::error(&e))
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use foodbridge_core::config::RealtimeConfig;
    use foodbridge_core::types::id::UserId;
    use foodbridge_database::{MemoryStore, UserDirectory};
    use foodbridge_entity::user::{User, UserRole};
    use foodbridge_service::{EventSink, NotificationEmitter};

    use super::*;
    use crate::hub::RealtimeHub;

    async fn seed(store: &MemoryStore, role: UserRole) -> RequestContext {
        let id = UserId::new();
        store
            .upsert(&User {
                id,
                email: format!("{id}@example.test"),
                full_name: format!("Test {role}"),
                role,
                is_active: true,
                created_at: Utc::now(),
            })
            .await
            .unwrap();
        RequestContext::new(id, role)
    }

    fn dispatcher(store: &MemoryStore, hub: Arc<RealtimeHub>) -> InboundDispatcher {
        let shared = Arc::new(store.clone());
        let emitter = NotificationEmitter::new(shared.clone(), hub as Arc<dyn EventSink>);
        InboundDispatcher::new(
            Arc::new(MessageService::new(
                shared.clone(),
                shared.clone(),
                shared.clone(),
                emitter.clone(),
            )),
            Arc::new(AssignmentService::new(
                shared.clone(),
                shared.clone(),
                shared,
                emitter,
            )),
        )
    }

    #[tokio::test]
    async fn test_send_message_frame_reaches_recipient() {
        let store = MemoryStore::new();
        let hub = Arc::new(RealtimeHub::new(&RealtimeConfig::default()));
        let inbound = dispatcher(&store, hub.clone());
        let donor = seed(&store, UserRole::Donor).await;
        let ngo = seed(&store, UserRole::Ngo).await;
        let mut rx = hub.subscribe(ngo.user_id);

        let raw = format!(
            r#"{{"type":"send_message","recipient_id":"{}","content":"Ready at noon"}}"#,
            ngo.user_id
        );
        let reply = inbound.handle(&donor, &raw).await;
        assert!(matches!(reply, Some(OutboundMessage::MessageSent { .. })));

        assert_eq!(rx.recv().await.unwrap().event_type(), "notification.created");
        assert_eq!(rx.recv().await.unwrap().event_type(), "message.received");
    }

    #[tokio::test]
    async fn test_rejected_frames_get_error_replies() {
        let store = MemoryStore::new();
        let hub = Arc::new(RealtimeHub::new(&RealtimeConfig::default()));
        let inbound = dispatcher(&store, hub);
        let donor = seed(&store, UserRole::Donor).await;

        match inbound.handle(&donor, "not json").await {
            Some(OutboundMessage::Error { code, .. }) => assert_eq!(code, "INVALID_MESSAGE"),
            other => panic!("unexpected reply {other:?}"),
        }

        let raw = format!(
            r#"{{"type":"update_volunteer_location","assignment_id":"{}","latitude":1.0,"longitude":2.0}}"#,
            UserId::new()
        );
        match inbound.handle(&donor, &raw).await {
            Some(OutboundMessage::Error { code, .. }) => assert_eq!(code, "NOT_FOUND"),
            other => panic!("unexpected reply {other:?}"),
        }
    }
}
