//! Direct message handlers.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;

use foodbridge_core::types::pagination::PageResponse;
use foodbridge_entity::message::{DirectMessage, MessageFilter};
use foodbridge_service::message::SendMessageInput;

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// POST /api/messages
pub async fn send_message(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<SendMessageInput>,
) -> Result<(StatusCode, Json<ApiResponse<DirectMessage>>), ApiError> {
    let message = state.message_service.send_message(&auth, input).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(message))))
}

/// GET /api/messages
pub async fn list_messages(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(filter): Query<MessageFilter>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<DirectMessage>>>, ApiError> {
    let page = state
        .message_service
        .list_messages(&auth, filter, params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}
