//! WebSocket connection handlers.

use std::{sync::Arc, time::Duration};

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, LaunchEvent},
    infrastructure::dto::websocket::ClientEvent,
    ui::state::AppState,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Parse an inbound frame payload into a domain event.
///
/// Returns `None` for anything that is not a well-formed event: invalid
/// JSON, unknown `type`, or a missing or non-string `userId`.
pub fn parse_event(text: &str) -> Option<LaunchEvent> {
    match serde_json::from_str::<ClientEvent>(text) {
        Ok(event) => Some(LaunchEvent::from(event)),
        Err(e) => {
            tracing::debug!("Ignoring malformed message: {}", e);
            None
        }
    }
}

/// Apply one inbound payload.
///
/// The event runs on its own task, so tearing down this session cannot
/// interrupt a committed change before its broadcast.
async fn dispatch_payload(state: &AppState, connection_id: ConnectionId, text: &str) {
    tracing::debug!("Received from '{}': {}", connection_id, text);
    let Some(event) = parse_event(text) else {
        return;
    };

    match state.apply_event_usecase.clone().spawn_execute(event).await {
        Ok(Ok(_)) => {}
        Ok(Err(e)) => tracing::error!("Failed to apply event: {}", e),
        Err(e) => tracing::error!("Event task failed: {}", e),
    }
}

/// Spawns a task that drains the rx channel into the WebSocket sink.
///
/// Each write is bounded by `send_timeout`; a peer that stops reading ends
/// its own session without holding up anyone else.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
    connection_id: ConnectionId,
    send_timeout: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            match tokio::time::timeout(send_timeout, sender.send(Message::Text(msg.into()))).await
            {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    tracing::debug!("Failed to write to connection '{}': {}", connection_id, e);
                    break;
                }
                Err(_) => {
                    tracing::warn!(
                        "Write to connection '{}' timed out after {:?}, closing",
                        connection_id,
                        send_timeout
                    );
                    break;
                }
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = ConnectionId::generate();
    let (sender, mut receiver) = socket.split();

    // Create a channel for this connection to receive snapshots
    let (tx, rx) = mpsc::unbounded_channel();

    if let Err(e) = state
        .connect_client_usecase
        .execute(connection_id, tx)
        .await
    {
        tracing::error!("Failed to connect '{}': {}", connection_id, e);
        return;
    }
    let total = state.get_launch_state_usecase.status().await.connected_clients;
    tracing::info!(
        "New client '{}' connected. Total clients: {}",
        connection_id,
        total
    );

    let mut send_task = pusher_loop(rx, sender, connection_id, state.send_timeout);

    let state_clone = state.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", connection_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    dispatch_payload(&state_clone, connection_id, text.as_str()).await;
                }
                Message::Binary(data) => match std::str::from_utf8(&data) {
                    Ok(text) => dispatch_payload(&state_clone, connection_id, text).await,
                    Err(_) => {
                        tracing::debug!("Ignoring non-UTF-8 binary frame ({} bytes)", data.len());
                    }
                },
                Message::Close(_) => {
                    tracing::debug!("Client '{}' requested close", connection_id);
                    break;
                }
                // Ping/pong is handled automatically by the WebSocket protocol
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    let remaining = state
        .disconnect_client_usecase
        .execute(&connection_id)
        .await;
    tracing::info!(
        "Client '{}' disconnected. Total clients: {}",
        connection_id,
        remaining
    );
}
