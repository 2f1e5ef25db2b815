//! Domain errors.

use thiserror::Error;

use super::value_object::ConnectionId;

/// Errors raised while pushing a frame to a connection
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MessagePushError {
    /// No outbound channel is registered for the connection
    #[error("Connection '{0}' is not registered")]
    ClientNotFound(ConnectionId),

    /// The connection's outbound channel is closed
    #[error("Failed to push message: {0}")]
    PushFailed(String),
}
