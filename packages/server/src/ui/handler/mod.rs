//! Request handlers.

mod http;
mod websocket;

pub use http::{health_check, list_rooms, not_found};
pub use websocket::websocket_handler;
