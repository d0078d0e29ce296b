//! Direct message delivery.

use std::sync::Arc;

use tracing::info;

use foodbridge_core::error::AppError;
use foodbridge_core::events::{DomainEvent, EventPayload, MessageEvent};
use foodbridge_core::result::AppResult;
use foodbridge_core::types::pagination::{PageRequest, PageResponse};
use foodbridge_database::{DonationStore, MessageStore, UserDirectory};
use foodbridge_entity::message::{DirectMessage, MessageFilter, NewMessage};
use foodbridge_entity::notification::{NewNotification, RelatedEntity};

use super::input::SendMessageInput;
use crate::context::RequestContext;
use crate::notification::{NotificationEmitter, messages};
use crate::validation::validate_input;

/// Stores direct messages and notifies their recipients.
#[derive(Clone)]
pub struct MessageService {
    messages: Arc<dyn MessageStore>,
    donations: Arc<dyn DonationStore>,
    users: Arc<dyn UserDirectory>,
    emitter: NotificationEmitter,
}

impl std::fmt::Debug for MessageService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageService").finish_non_exhaustive()
    }
}

impl MessageService {
    /// Creates a new message service.
    pub fn new(
        messages: Arc<dyn MessageStore>,
        donations: Arc<dyn DonationStore>,
        users: Arc<dyn UserDirectory>,
        emitter: NotificationEmitter,
    ) -> Self {
        Self {
            messages,
            donations,
            users,
            emitter,
        }
    }

    /// Send a message from the acting user.
    ///
    /// The recipient gets a "New Message" notification pointing at the
    /// stored message, followed by a `message.received` event carrying the
    /// text. Notification failure does not fail the send.
    pub async fn send_message(
        &self,
        ctx: &RequestContext,
        input: SendMessageInput,
    ) -> AppResult<DirectMessage> {
        validate_input(&input)?;
        if input.content.trim().is_empty() {
            return Err(AppError::validation("Message must not be blank"));
        }
        if input.recipient_id == ctx.user_id {
            return Err(AppError::validation("Cannot send a message to yourself"));
        }

        let recipient = self
            .users
            .find_by_id(input.recipient_id)
            .await?
            .filter(|u| u.is_active)
            .ok_or_else(|| {
                AppError::not_found(format!("User {} not found", input.recipient_id))
            })?;

        if let Some(donation_id) = input.donation_id {
            self.donations
                .find_by_id(donation_id)
                .await?
                .ok_or_else(|| AppError::not_found(format!("Donation {donation_id} not found")))?;
        }

        let message = self
            .messages
            .append(&NewMessage {
                sender_id: ctx.user_id,
                recipient_id: recipient.id,
                donation_id: input.donation_id,
                content: input.content,
            })
            .await?;

        info!(
            message_id = %message.id,
            sender_id = %message.sender_id,
            recipient_id = %message.recipient_id,
            "Direct message stored"
        );

        self.emitter
            .emit(
                Some(ctx.user_id),
                NewNotification {
                    user_id: message.recipient_id,
                    title: messages::NEW_MESSAGE_TITLE.to_string(),
                    message: messages::NEW_MESSAGE_BODY.to_string(),
                    related: Some(RelatedEntity::Message(message.id)),
                },
            )
            .await;
        self.emitter.broadcast(
            &[message.recipient_id],
            &DomainEvent::new(
                Some(ctx.user_id),
                EventPayload::Message(MessageEvent::Received {
                    message_id: message.id,
                    sender_id: message.sender_id,
                    donation_id: message.donation_id,
                    content: message.content.clone(),
                    sent_at: message.created_at,
                }),
            ),
        );

        Ok(message)
    }

    /// The acting user's sent and received messages, newest first.
    pub async fn list_messages(
        &self,
        ctx: &RequestContext,
        filter: MessageFilter,
        page: PageRequest,
    ) -> AppResult<PageResponse<DirectMessage>> {
        self.messages.list_for_user(ctx.user_id, &filter, &page).await
    }
}
