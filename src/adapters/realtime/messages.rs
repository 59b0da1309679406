//! Wire protocol for the realtime control channel.
//!
//! Defines the JSON messages exchanged over the WebSocket:
//! - Client → Server: vendor registration, location updates, pings
//! - Server → Client: confirmations, fan-out broadcasts, errors, pongs
//!
//! Frames are `type`-tagged JSON. Inbound frames go through [`parse_frame`],
//! which separates three cases the connection loop treats differently:
//! well-formed messages, unknown message types (logged and ignored), and
//! malformed frames (answered with an `error` reply to the sender only).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::chat::Message;
use crate::domain::foundation::VendorId;
use crate::domain::vendor::GeoPoint;
use crate::ports::BroadcastEvent;

// ============================================
// Client → Server Messages
// ============================================

/// All message types that can be received from a client.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Identify this connection as a vendor.
    #[serde(rename_all = "camelCase")]
    Register { vendor_id: VendorId },

    /// Publish a vendor's current position to all listeners.
    #[serde(rename_all = "camelCase")]
    LocationUpdate {
        vendor_id: VendorId,
        location: LocationPayload,
    },

    /// Announce that a vendor's position is no longer available.
    #[serde(rename_all = "camelCase")]
    LocationRemoved { vendor_id: VendorId },

    /// Heartbeat request.
    Ping,
}

/// Raw coordinates as received on the wire.
///
/// Range checking happens when the connection loop converts this into a
/// [`GeoPoint`]; out-of-range values earn the sender an `error` reply.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LocationPayload {
    pub latitude: f64,
    pub longitude: f64,
}

// ============================================
// Server → Client Messages
// ============================================

/// All message types that can be sent to a client.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Registration acknowledged.
    #[serde(rename_all = "camelCase")]
    RegisterConfirmation { vendor_id: VendorId },

    /// A vendor's position changed (fan-out to every subscriber).
    #[serde(rename_all = "camelCase")]
    LocationUpdate {
        vendor_id: VendorId,
        location: GeoPoint,
        timestamp: String,
    },

    /// Sent to the originator after its location update was broadcast.
    #[serde(rename_all = "camelCase")]
    LocationUpdateConfirmation {
        vendor_id: VendorId,
        broadcast_count: usize,
    },

    /// A vendor's position was removed (fan-out to every subscriber).
    #[serde(rename_all = "camelCase")]
    LocationRemoved {
        vendor_id: VendorId,
        timestamp: String,
    },

    /// A chat message was sent (fan-out to every subscriber).
    #[serde(rename_all = "camelCase")]
    NewMessage {
        conversation_id: String,
        message: MessagePayload,
    },

    /// Heartbeat response.
    Pong,

    /// The sender's last frame could not be processed.
    Error { message: String },
}

/// Chat message as carried in a `new_message` broadcast.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagePayload {
    pub id: String,
    pub sender_id: String,
    pub sender_role: String,
    pub body: String,
    pub sent_at: String,
}

impl From<&Message> for MessagePayload {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id().to_string(),
            sender_id: message.sender().as_uuid().to_string(),
            sender_role: message.sender_role().to_string(),
            body: message.body().to_string(),
            sent_at: message.sent_at().to_rfc3339(),
        }
    }
}

impl From<BroadcastEvent> for ServerMessage {
    fn from(event: BroadcastEvent) -> Self {
        match event {
            BroadcastEvent::LocationUpdated {
                vendor_id,
                location,
                timestamp,
            } => ServerMessage::LocationUpdate {
                vendor_id,
                location,
                timestamp: timestamp.to_rfc3339(),
            },
            BroadcastEvent::LocationRemoved {
                vendor_id,
                timestamp,
            } => ServerMessage::LocationRemoved {
                vendor_id,
                timestamp: timestamp.to_rfc3339(),
            },
            BroadcastEvent::MessageSent { message } => ServerMessage::NewMessage {
                conversation_id: message.conversation_id().to_string(),
                message: MessagePayload::from(&message),
            },
        }
    }
}

// ============================================
// Frame Parsing
// ============================================

/// Message types the connection loop knows how to handle.
const KNOWN_TYPES: &[&str] = &["register", "location_update", "location_removed", "ping"];

/// Outcome of parsing an inbound text frame.
#[derive(Debug, Clone)]
pub enum InboundFrame {
    /// A well-formed protocol message.
    Message(ClientMessage),

    /// Valid JSON with a `type` this protocol does not define.
    Unknown(String),
}

/// Why an inbound frame was rejected.
///
/// These are the sender's fault; the reply goes to that connection only.
#[derive(Debug, Clone, Error)]
pub enum FrameError {
    #[error("invalid JSON payload")]
    InvalidJson,

    #[error("missing message type")]
    MissingType,

    #[error("invalid {message_type} payload: {reason}")]
    InvalidPayload { message_type: String, reason: String },
}

/// Parse one inbound text frame.
///
/// Unknown message types are reported as [`InboundFrame::Unknown`] so the
/// caller can log and drop them; everything else that fails to parse is a
/// [`FrameError`] the caller answers with an `error` reply.
pub fn parse_frame(text: &str) -> Result<InboundFrame, FrameError> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|_| FrameError::InvalidJson)?;

    let message_type = value
        .get("type")
        .and_then(serde_json::Value::as_str)
        .ok_or(FrameError::MissingType)?
        .to_string();

    if !KNOWN_TYPES.contains(&message_type.as_str()) {
        return Ok(InboundFrame::Unknown(message_type));
    }

    match serde_json::from_value::<ClientMessage>(value) {
        Ok(message) => Ok(InboundFrame::Message(message)),
        Err(err) => Err(FrameError::InvalidPayload {
            message_type,
            reason: err.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;

    #[test]
    fn parses_register_frame() {
        let vendor_id = VendorId::new();
        let json = format!(r#"{{"type":"register","vendorId":"{}"}}"#, vendor_id);

        let frame = parse_frame(&json).unwrap();
        match frame {
            InboundFrame::Message(ClientMessage::Register { vendor_id: parsed }) => {
                assert_eq!(parsed, vendor_id);
            }
            other => panic!("unexpected frame: {:?}", other),
        }
    }

    #[test]
    fn parses_location_update_frame() {
        let json = format!(
            r#"{{"type":"location_update","vendorId":"{}","location":{{"latitude":52.52,"longitude":13.405}}}}"#,
            VendorId::new()
        );

        let frame = parse_frame(&json).unwrap();
        match frame {
            InboundFrame::Message(ClientMessage::LocationUpdate { location, .. }) => {
                assert_eq!(location.latitude, 52.52);
                assert_eq!(location.longitude, 13.405);
            }
            other => panic!("unexpected frame: {:?}", other),
        }
    }

    #[test]
    fn parses_bare_ping() {
        let frame = parse_frame(r#"{"type":"ping"}"#).unwrap();
        assert!(matches!(
            frame,
            InboundFrame::Message(ClientMessage::Ping)
        ));
    }

    #[test]
    fn unknown_type_is_reported_not_rejected() {
        let frame = parse_frame(r#"{"type":"subscribe","channel":"all"}"#).unwrap();
        match frame {
            InboundFrame::Unknown(message_type) => assert_eq!(message_type, "subscribe"),
            other => panic!("unexpected frame: {:?}", other),
        }
    }

    #[test]
    fn broken_json_is_invalid() {
        let err = parse_frame("{not json").unwrap_err();
        assert!(matches!(err, FrameError::InvalidJson));
    }

    #[test]
    fn frame_without_type_is_rejected() {
        let err = parse_frame(r#"{"vendorId":"abc"}"#).unwrap_err();
        assert!(matches!(err, FrameError::MissingType));
    }

    #[test]
    fn known_type_with_missing_fields_is_rejected() {
        let err = parse_frame(r#"{"type":"location_update","vendorId":"not-a-uuid"}"#).unwrap_err();
        match err {
            FrameError::InvalidPayload { message_type, .. } => {
                assert_eq!(message_type, "location_update");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn register_confirmation_serializes_with_type_tag() {
        let vendor_id = VendorId::new();
        let msg = ServerMessage::RegisterConfirmation { vendor_id };

        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains(r#""type":"register_confirmation""#));
        assert!(json.contains(&format!(r#""vendorId":"{}""#, vendor_id)));
    }

    #[test]
    fn location_update_serializes_camel_case_fields() {
        let msg = ServerMessage::LocationUpdate {
            vendor_id: VendorId::new(),
            location: GeoPoint::new(52.52, 13.405).unwrap(),
            timestamp: "2024-06-01T12:00:00+00:00".to_string(),
        };

        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains(r#""type":"location_update""#));
        assert!(json.contains(r#""latitude":52.52"#));
        assert!(json.contains(r#""longitude":13.405"#));
    }

    #[test]
    fn confirmation_carries_broadcast_count() {
        let msg = ServerMessage::LocationUpdateConfirmation {
            vendor_id: VendorId::new(),
            broadcast_count: 3,
        };

        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains(r#""type":"location_update_confirmation""#));
        assert!(json.contains(r#""broadcastCount":3"#));
    }

    #[test]
    fn pong_is_a_bare_tag() {
        let json = serde_json::to_string(&ServerMessage::Pong).unwrap();
        assert_eq!(json, r#"{"type":"pong"}"#);
    }

    #[test]
    fn error_reply_carries_the_reason() {
        let msg = ServerMessage::Error {
            message: FrameError::InvalidJson.to_string(),
        };

        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains(r#""type":"error""#));
        assert!(json.contains(r#""message":"invalid JSON payload""#));
    }

    #[test]
    fn broadcast_event_maps_to_wire_message() {
        let vendor_id = VendorId::new();
        let event = BroadcastEvent::LocationRemoved {
            vendor_id,
            timestamp: Timestamp::now(),
        };

        let msg = ServerMessage::from(event);
        assert!(matches!(
            msg,
            ServerMessage::LocationRemoved { vendor_id: v, .. } if v == vendor_id
        ));
    }
}
