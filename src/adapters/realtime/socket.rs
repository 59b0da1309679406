//! WebSocket upgrade handler for the realtime control channel.
//!
//! Handles the HTTP → WebSocket upgrade and runs the connection lifecycle:
//! 1. Register the connection (anonymous until a `register` frame arrives)
//! 2. Subscribe to the broadcast hub
//! 3. Pump hub fan-out and inbound frames until disconnect
//! 4. Unregister on close
//!
//! Inbound frames never crash the connection: malformed input earns an
//! `error` reply on this connection only, unknown message types are logged
//! and dropped.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
    routing::get,
    Router,
};
use futures::{SinkExt, StreamExt};
use tokio::sync::broadcast;

use crate::domain::foundation::Timestamp;
use crate::domain::vendor::GeoPoint;
use crate::ports::{BroadcastEvent, EventBroadcaster};

use super::{
    hub::BroadcastHub,
    messages::{parse_frame, ClientMessage, InboundFrame, ServerMessage},
    registry::{ConnectionId, ConnectionRegistry},
};

/// State required for realtime connection handling.
#[derive(Clone)]
pub struct RealtimeState {
    /// Table of live connections.
    pub registry: Arc<ConnectionRegistry>,

    /// Fan-out hub every connection subscribes to.
    pub hub: Arc<BroadcastHub>,
}

impl RealtimeState {
    pub fn new(registry: Arc<ConnectionRegistry>, hub: Arc<BroadcastHub>) -> Self {
        Self { registry, hub }
    }
}

/// Create the router for the realtime endpoint.
///
/// Route: `GET /ws`
pub fn realtime_router() -> Router<RealtimeState> {
    Router::new().route("/ws", get(ws_handler))
}

/// Handle WebSocket upgrade requests.
///
/// Identity is not checked at upgrade time; a connection stays anonymous
/// until it sends a `register` frame.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<RealtimeState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Run an established connection until it closes.
async fn handle_socket(socket: WebSocket, state: RealtimeState) {
    let connection_id = ConnectionId::new();
    state.registry.register(connection_id, None).await;
    tracing::debug!(%connection_id, "realtime connection opened");

    let mut events = state.hub.subscribe();
    let (mut sender, mut receiver) = socket.split();

    loop {
        tokio::select! {
            // Hub fan-out toward this client
            event = events.recv() => match event {
                Ok(message) => {
                    if let Err(e) = send_message(&mut sender, &message).await {
                        tracing::debug!(%connection_id, "send failed, closing: {}", e);
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    // Slow consumer: drop what it missed and keep going
                    tracing::warn!(%connection_id, skipped, "subscriber lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },

            // Inbound frames from this client
            frame = receiver.next() => match frame {
                Some(Ok(Message::Text(text))) => {
                    if let Some(reply) = handle_frame(&text, connection_id, &state).await {
                        if let Err(e) = send_message(&mut sender, &reply).await {
                            tracing::debug!(%connection_id, "reply failed, closing: {}", e);
                            break;
                        }
                    }
                }
                Some(Ok(Message::Close(_))) => {
                    tracing::debug!(%connection_id, "client sent close frame");
                    break;
                }
                // Binary unsupported; protocol ping/pong handled by axum
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::debug!(%connection_id, "receive error: {}", e);
                    break;
                }
                None => break,
            },
        }
    }

    state.registry.unregister(&connection_id).await;
    tracing::debug!(%connection_id, "realtime connection closed");
}

/// Process one inbound text frame, returning the reply for the sender.
///
/// Broadcast effects go through the hub; only confirmations, pongs and
/// error replies travel back on the originating connection directly.
async fn handle_frame(
    text: &str,
    connection_id: ConnectionId,
    state: &RealtimeState,
) -> Option<ServerMessage> {
    let frame = match parse_frame(text) {
        Ok(frame) => frame,
        Err(err) => {
            return Some(ServerMessage::Error {
                message: err.to_string(),
            });
        }
    };

    let message = match frame {
        InboundFrame::Message(message) => message,
        InboundFrame::Unknown(message_type) => {
            tracing::debug!(%connection_id, message_type, "ignoring unknown message type");
            return None;
        }
    };

    match message {
        ClientMessage::Register { vendor_id } => {
            state.registry.register(connection_id, Some(vendor_id)).await;
            tracing::debug!(%connection_id, %vendor_id, "connection registered as vendor");
            Some(ServerMessage::RegisterConfirmation { vendor_id })
        }

        ClientMessage::LocationUpdate {
            vendor_id,
            location,
        } => match GeoPoint::new(location.latitude, location.longitude) {
            Ok(location) => {
                let broadcast_count = state
                    .hub
                    .broadcast(BroadcastEvent::LocationUpdated {
                        vendor_id,
                        location,
                        timestamp: Timestamp::now(),
                    })
                    .await;
                Some(ServerMessage::LocationUpdateConfirmation {
                    vendor_id,
                    broadcast_count,
                })
            }
            Err(err) => Some(ServerMessage::Error {
                message: err.to_string(),
            }),
        },

        ClientMessage::LocationRemoved { vendor_id } => {
            state
                .hub
                .broadcast(BroadcastEvent::LocationRemoved {
                    vendor_id,
                    timestamp: Timestamp::now(),
                })
                .await;
            None
        }

        ClientMessage::Ping => Some(ServerMessage::Pong),
    }
}

/// Send a JSON message over the WebSocket.
async fn send_message(
    sender: &mut futures::stream::SplitSink<WebSocket, Message>,
    msg: &ServerMessage,
) -> Result<(), axum::Error> {
    let json = serde_json::to_string(msg).expect("ServerMessage serialization should not fail");
    sender.send(Message::Text(json)).await
}
