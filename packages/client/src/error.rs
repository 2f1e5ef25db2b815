//! Error types for the chat client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Room or name is empty after trimming
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    /// Connection could not be established or a frame could not be written
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The server closed the connection or the socket failed while reading
    #[error("Connection lost")]
    ConnectionLost,

    /// An outgoing frame could not be encoded
    #[error("Failed to encode frame: {0}")]
    Encode(#[from] serde_json::Error),

    /// Reconnection gave up
    #[error("Failed to reconnect after {0} attempts")]
    ReconnectExhausted(u32),
}
