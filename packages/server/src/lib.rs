//! Room-based WebSocket chat relay.
//!
//! Clients connect, declare a room and a display name with a `join` frame, and
//! every `chat` frame they send afterwards is relayed to the other participants
//! of that room.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
