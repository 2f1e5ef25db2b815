//! WebSocket frame DTOs.
//!
//! Client → server frames are a JSON envelope `{ "type": string, "payload": object }`:
//!
//! ```text
//! { "type": "join", "payload": { "roomId": string, "name": string } }
//! { "type": "chat", "payload": { "message": string } }
//! ```
//!
//! Server → client frames carry no envelope: `{ "text": string, "name": string }`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Envelope type of a `join` frame
pub const JOIN_TYPE: &str = "join";
/// Envelope type of a `chat` frame
pub const CHAT_TYPE: &str = "chat";

/// Errors raised while decoding an inbound frame
#[derive(Debug, Error)]
pub enum FrameDecodeError {
    /// Not a JSON object with a string `type` and an object `payload`
    #[error("malformed frame envelope: {0}")]
    MalformedEnvelope(#[source] serde_json::Error),

    /// Known `type` whose payload does not match its schema
    #[error("invalid '{frame_type}' payload: {source}")]
    InvalidPayload {
        frame_type: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Raw envelope, before the payload is interpreted
#[derive(Debug, Deserialize)]
struct Envelope {
    r#type: String,
    payload: Map<String, Value>,
}

/// Payload of a `join` frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinPayload {
    #[serde(rename = "roomId")]
    pub room_id: String,
    pub name: String,
}

/// Payload of a `chat` frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatPayload {
    pub message: String,
}

/// A decoded client → server frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundFrame {
    Join(JoinPayload),
    Chat(ChatPayload),
    /// Well-formed envelope with a `type` the relay does not handle
    Unknown(String),
}

impl InboundFrame {
    /// Strictly decode a frame. Nothing is partially applied on failure.
    pub fn decode(bytes: &[u8]) -> Result<Self, FrameDecodeError> {
        // Go through a JSON object first: derived structs would also accept arrays.
        let object: Map<String, Value> =
            serde_json::from_slice(bytes).map_err(FrameDecodeError::MalformedEnvelope)?;
        let envelope: Envelope = serde_json::from_value(Value::Object(object))
            .map_err(FrameDecodeError::MalformedEnvelope)?;
        let payload = Value::Object(envelope.payload);

        match envelope.r#type.as_str() {
            JOIN_TYPE => serde_json::from_value(payload)
                .map(InboundFrame::Join)
                .map_err(|source| FrameDecodeError::InvalidPayload {
                    frame_type: JOIN_TYPE,
                    source,
                }),
            CHAT_TYPE => serde_json::from_value(payload)
                .map(InboundFrame::Chat)
                .map_err(|source| FrameDecodeError::InvalidPayload {
                    frame_type: CHAT_TYPE,
                    source,
                }),
            _ => Ok(InboundFrame::Unknown(envelope.r#type)),
        }
    }
}

/// Client → server frame as written by clients
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "lowercase")]
pub enum OutboundClientFrame {
    Join(JoinPayload),
    Chat(ChatPayload),
}

impl OutboundClientFrame {
    pub fn join(room_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Join(JoinPayload {
            room_id: room_id.into(),
            name: name.into(),
        })
    }

    pub fn chat(message: impl Into<String>) -> Self {
        Self::Chat(ChatPayload {
            message: message.into(),
        })
    }
}

/// Server → client chat frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatBroadcastMessage {
    pub text: String,
    pub name: String,
}
