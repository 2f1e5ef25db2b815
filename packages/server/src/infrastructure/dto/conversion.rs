//! Conversion logic between DTOs and domain entities.

use crate::domain::{ChatMessage, DisplayName, MessageText, RoomId};
use crate::infrastructure::dto::websocket as dto;

// ========================================
// DTO → Domain Entity
// ========================================

impl From<dto::JoinPayload> for (RoomId, DisplayName) {
    fn from(payload: dto::JoinPayload) -> Self {
        (RoomId::from(payload.room_id), DisplayName::from(payload.name))
    }
}

impl From<dto::ChatPayload> for MessageText {
    fn from(payload: dto::ChatPayload) -> Self {
        MessageText::from(payload.message)
    }
}

// ========================================
// Domain Entity → DTO
// ========================================

impl From<ChatMessage> for dto::ChatBroadcastMessage {
    fn from(message: ChatMessage) -> Self {
        Self {
            text: message.text.into_string(),
            name: message.from.into_string(),
        }
    }
}
