//! Direct message repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use foodbridge_core::error::{AppError, ErrorKind};
use foodbridge_core::result::AppResult;
use foodbridge_core::types::id::UserId;
use foodbridge_core::types::pagination::{PageRequest, PageResponse};
use foodbridge_entity::message::{DirectMessage, MessageFilter, NewMessage};

use crate::store::MessageStore;

/// Repository for direct messages.
#[derive(Debug, Clone)]
pub struct MessageRepository {
    pool: PgPool,
}

impl MessageRepository {
    /// Create a new message repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageStore for MessageRepository {
    async fn append(&self, data: &NewMessage) -> AppResult<DirectMessage> {
        sqlx::query_as::<_, DirectMessage>(
            "INSERT INTO messages (sender_id, recipient_id, donation_id, content) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(data.sender_id)
        .bind(data.recipient_id)
        .bind(data.donation_id)
        .bind(&data.content)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to store message", e))
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
        filter: &MessageFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<DirectMessage>> {
        const WHERE: &str = "WHERE (sender_id = $1 OR recipient_id = $1) \
             AND ($2::uuid IS NULL \
                  OR (sender_id = $1 AND recipient_id = $2) \
                  OR (recipient_id = $1 AND sender_id = $2)) \
             AND ($3::uuid IS NULL OR donation_id = $3)";

        let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM messages {WHERE}"))
            .bind(user_id)
            .bind(filter.with_user)
            .bind(filter.donation_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count messages", e))?;

        let messages = sqlx::query_as::<_, DirectMessage>(&format!(
            "SELECT * FROM messages {WHERE} ORDER BY created_at DESC, id DESC LIMIT $4 OFFSET $5"
        ))
        .bind(user_id)
        .bind(filter.with_user)
        .bind(filter.donation_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list messages", e))?;

        Ok(PageResponse::new(
            messages,
            page.page,
            page.page_size,
            total as u64,
        ))
    }
}
