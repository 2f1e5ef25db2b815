//! Entities.

use serde::Serialize;

use super::value_object::{ConnectionId, DisplayName, MessageText, RoomId, Timestamp};

/// A joined connection's room and name association
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Participant {
    pub connection_id: ConnectionId,
    pub room_id: RoomId,
    pub name: DisplayName,
    pub joined_at: Timestamp,
}

impl Participant {
    pub fn new(
        connection_id: ConnectionId,
        room_id: RoomId,
        name: DisplayName,
        joined_at: Timestamp,
    ) -> Self {
        Self {
            connection_id,
            room_id,
            name,
            joined_at,
        }
    }

    /// Whether this participant should receive a message sent by `sender`
    ///
    /// Same room, different connection.
    pub fn is_peer_of(&self, sender: &Participant) -> bool {
        self.room_id == sender.room_id && self.connection_id != sender.connection_id
    }
}

/// Result of registering a `join`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinOutcome {
    /// The connection had no participant yet
    Joined,
    /// The connection had already joined; the previous association was replaced
    Rejoined { previous: Participant },
}

/// A chat message as relayed to room peers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub from: DisplayName,
    pub text: MessageText,
}

impl ChatMessage {
    pub fn new(from: DisplayName, text: MessageText) -> Self {
        Self { from, text }
    }
}
