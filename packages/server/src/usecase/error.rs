//! UseCase errors.

use thiserror::Error;

/// Errors raised while relaying a chat message
#[derive(Debug, Error)]
pub enum SendMessageError {
    /// The outgoing frame could not be encoded
    #[error("Failed to encode chat frame: {0}")]
    Encode(#[from] serde_json::Error),
}
