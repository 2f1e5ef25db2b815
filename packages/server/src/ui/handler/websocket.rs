//! WebSocket connection handlers.
//!
//! Each connection gets two tasks: one reading frames from the socket and
//! dispatching them in arrival order, one draining the connection's outbound
//! channel into the socket. When either ends, the other is aborted and the
//! connection is removed from the registry exactly once.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, DisplayName, JoinOutcome, RoomId},
    infrastructure::dto::websocket::InboundFrame,
    ui::state::AppState,
    usecase::Delivery,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_failed_upgrade(|e| tracing::warn!("WebSocket upgrade failed: {}", e))
        .on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives frames from the rx channel and pushes them to the WebSocket sender.
///
/// # Arguments
///
/// * `rx` - Channel receiver fed by broadcasts from room peers
/// * `sender` - WebSocket sink of this connection
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (sender, mut receiver) = socket.split();

    // Connected: the outbound channel exists, no participant yet
    let (tx, rx) = mpsc::unbounded_channel();
    let connection_id = state.connect_participant_usecase.execute(tx).await;
    tracing::info!("Connection '{}' opened", connection_id);

    let state_clone = state.clone();

    // Spawn a task to receive frames from this connection
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error on connection '{}': {}", connection_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    handle_frame(&state_clone, connection_id, text.as_str().as_bytes()).await
                }
                Message::Binary(data) => handle_frame(&state_clone, connection_id, &data).await,
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", connection_id);
                    break;
                }
                _ => {}
            }
        }
    });

    // Spawn a task to push frames from room peers to this connection
    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // Removed: no notification is sent to the room
    match state
        .disconnect_participant_usecase
        .execute(&connection_id)
        .await
    {
        Some(participant) => tracing::info!(
            "User '{}' left room '{}' (connection '{}')",
            participant.name,
            participant.room_id,
            connection_id
        ),
        None => tracing::info!("Connection '{}' closed without joining", connection_id),
    }
}

/// Decode one inbound frame and dispatch it
///
/// Invalid frames are logged and dropped; the connection stays open.
async fn handle_frame(state: &AppState, connection_id: ConnectionId, raw: &[u8]) {
    let frame = match InboundFrame::decode(raw) {
        Ok(frame) => frame,
        Err(e) => {
            tracing::warn!(
                "Dropping invalid frame from connection '{}': {} (raw: {})",
                connection_id,
                e,
                String::from_utf8_lossy(raw)
            );
            return;
        }
    };

    match frame {
        InboundFrame::Join(payload) => {
            let (room_id, name): (RoomId, DisplayName) = payload.into();
            let outcome = state
                .join_room_usecase
                .execute(connection_id, room_id.clone(), name.clone())
                .await;
            match outcome {
                JoinOutcome::Joined => tracing::info!(
                    "User '{}' joined room '{}' (connection '{}')",
                    name,
                    room_id,
                    connection_id
                ),
                JoinOutcome::Rejoined { previous } => tracing::info!(
                    "User '{}' joined room '{}' (connection '{}'), replacing '{}' in room '{}'",
                    name,
                    room_id,
                    connection_id,
                    previous.name,
                    previous.room_id
                ),
            }
        }
        InboundFrame::Chat(payload) => {
            match state
                .send_message_usecase
                .execute(connection_id, payload.into())
                .await
            {
                Ok(Delivery::NotJoined) => tracing::debug!(
                    "Ignoring chat from connection '{}' before join",
                    connection_id
                ),
                Ok(Delivery::Broadcast { targets, delivered }) => tracing::debug!(
                    "Relayed chat from connection '{}' to {}/{} peers",
                    connection_id,
                    delivered,
                    targets.len()
                ),
                Err(e) => tracing::warn!(
                    "Failed to relay chat from connection '{}': {}",
                    connection_id,
                    e
                ),
            }
        }
        InboundFrame::Unknown(frame_type) => tracing::debug!(
            "Ignoring frame of unknown type '{}' from connection '{}'",
            frame_type,
            connection_id
        ),
    }
}
