//! Domain layer: value objects, entities and the traits the relay depends on.
//!
//! 具体的な実装（インメモリのレジストリ、WebSocket への送信）は Infrastructure 層が提供します。

pub mod entity;
pub mod error;
pub mod message_pusher;
pub mod registry;
pub mod value_object;

pub use entity::{ChatMessage, JoinOutcome, Participant};
pub use error::MessagePushError;
pub use message_pusher::{MessagePusher, PusherChannel};
pub use registry::ParticipantRegistry;
pub use value_object::{ConnectionId, DisplayName, MessageText, RoomId, Timestamp};

#[cfg(test)]
pub use message_pusher::MockMessagePusher;
