//! WebSocket upgrade handler and per-connection loop.

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Query, State, WebSocketUpgrade};
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::mpsc;
use tracing::{info, warn};

use foodbridge_realtime::OutboundMessage;
use foodbridge_service::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Query parameter for WebSocket authentication.
#[derive(Debug, serde::Deserialize)]
pub struct WsQuery {
    /// JWT access token.
    pub token: String,
}

/// GET /ws?token={jwt}
pub async fn ws_upgrade(
    State(state): State<AppState>,
    ws: WebSocketUpgrade,
    Query(query): Query<WsQuery>,
) -> Result<Response, ApiError> {
    // Authenticate before upgrade
    let claims = state.jwt_decoder.decode_access_token(&query.token)?;
    let ctx = RequestContext::new(claims.user_id(), claims.role);

    Ok(ws.on_upgrade(move |socket| handle_ws_connection(state, ctx, socket)))
}

/// Replies to inbound frames queued per connection.
const REPLY_BUFFER: usize = 32;

/// Forwards the user's events to the socket and dispatches the frames the
/// client sends, until either side closes.
async fn handle_ws_connection(state: AppState, ctx: RequestContext, socket: WebSocket) {
    let user_id = ctx.user_id;
    let (mut ws_tx, mut ws_rx) = socket.split();
    let mut events = state.realtime.subscribe(user_id);
    let (reply_tx, mut replies) = mpsc::channel::<OutboundMessage>(REPLY_BUFFER);

    info!(user_id = %user_id, "WebSocket connection established");

    let outbound_task = tokio::spawn(async move {
        let hello = OutboundMessage::Connected {
            timestamp: chrono::Utc::now(),
        };
        if ws_tx.send(Message::Text(hello.to_json().into())).await.is_err() {
            return;
        }

        loop {
            let frame = tokio::select! {
                received = events.recv() => match received {
                    Ok(event) => OutboundMessage::event(event),
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(user_id = %user_id, skipped, "WebSocket client lagging");
                        OutboundMessage::Lagged { skipped }
                    }
                    Err(RecvError::Closed) => break,
                },
                Some(reply) = replies.recv() => reply,
            };
            if ws_tx.send(Message::Text(frame.to_json().into())).await.is_err() {
                break;
            }
        }
    });

    while let Some(result) = ws_rx.next().await {
        match result {
            Ok(Message::Text(text)) => {
                let Some(reply) = state.inbound.handle(&ctx, text.as_str()).await else {
                    continue;
                };
                if reply_tx.send(reply).await.is_err() {
                    break;
                }
            }
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                warn!(user_id = %user_id, error = %e, "WebSocket error");
                break;
            }
        }
    }

    outbound_task.abort();
    // Wait for the task to drop its receiver before releasing the channel.
    let _ = outbound_task.await;
    state.realtime.release(user_id);

    info!(user_id = %user_id, "WebSocket connection closed");
}
