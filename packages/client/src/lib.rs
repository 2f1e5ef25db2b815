//! Terminal chat client for the room relay server.
//!
//! Joins a room under a display name, relays lines typed at the prompt as chat
//! messages and prints messages from the other participants of the room.

pub mod error;
pub mod formatter;
pub mod runner;
pub mod session;
pub mod ui;

pub use error::ClientError;
pub use runner::run_client;
