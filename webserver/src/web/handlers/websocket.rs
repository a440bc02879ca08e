//! WebSocket handler pushing pitch store changes to display clients
//!
//! A client first receives the full list, then one message per store change.
//! A client that falls behind the event buffer gets a fresh snapshot instead.

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::http::HeaderMap;
use axum::http::header::USER_AGENT;
use axum::response::IntoResponse;
use tokio::sync::broadcast::error::RecvError;

use resolver::ScoringClient;
use shared::{ServiceId, service_debug, service_info, service_warn};

use crate::state::AppState;
use crate::traits::ClientRegistry;
use crate::types::{ClientConnection, ClientId, ClientMessage};

/// Upgrade to a WebSocket - /ws
pub async fn websocket_handler<C, R>(
    ws: WebSocketUpgrade,
    headers: HeaderMap,
    State(state): State<AppState<C, R>>,
) -> impl IntoResponse
where
    C: ScoringClient + 'static,
    R: ClientRegistry + 'static,
{
    let user_agent = headers
        .get(USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    ws.on_upgrade(move |socket| handle_socket(socket, state, user_agent))
}

async fn handle_socket<C, R>(mut socket: WebSocket, state: AppState<C, R>, user_agent: Option<String>)
where
    C: ScoringClient + 'static,
    R: ClientRegistry + 'static,
{
    let client_id = ClientId::new();

    // Snapshot and subscription under one lock so no change falls between them
    let (snapshot, mut events) = {
        let store = state.store.read().await;
        (store.snapshot(), store.subscribe())
    };

    state
        .clients
        .add_client(ClientConnection::new(client_id.clone(), user_agent))
        .await;
    service_info!(ServiceId::current(), "🔗 Display client {} connected", client_id);

    if send(&mut socket, &ClientMessage::Snapshot(snapshot)).await {
        loop {
            tokio::select! {
                event = events.recv() => {
                    let message = match event {
                        Ok(event) => ClientMessage::Change(event),
                        Err(RecvError::Lagged(skipped)) => {
                            service_warn!(
                                ServiceId::current(),
                                "Client {} lagged by {} events, resending snapshot",
                                client_id,
                                skipped
                            );
                            ClientMessage::Snapshot(state.store.read().await.snapshot())
                        }
                        Err(RecvError::Closed) => break,
                    };
                    if !send(&mut socket, &message).await {
                        break;
                    }
                }
                incoming = socket.recv() => {
                    match incoming {
                        Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                        Some(Ok(_)) => {}
                    }
                }
            }
        }
    }

    state.clients.remove_client(&client_id).await;
    service_info!(ServiceId::current(), "🔌 Display client {} disconnected", client_id);
}

/// Returns false once the socket is unusable
async fn send(socket: &mut WebSocket, message: &ClientMessage) -> bool {
    let text = match serde_json::to_string(message) {
        Ok(text) => text,
        Err(e) => {
            service_warn!(ServiceId::current(), error = %e, "Failed to encode client message");
            return true;
        }
    };

    match socket.send(Message::Text(text)).await {
        Ok(()) => true,
        Err(e) => {
            service_debug!(ServiceId::current(), error = %e, "WebSocket send failed");
            false
        }
    }
}
