//! Message formatting utilities for client display.

use relay_shared::time::millis_to_local_clock;

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format the banner shown once the room is joined
    pub fn format_joined(room: &str, name: &str) -> String {
        format!(
            "\n============================================================\n\
             Joined room '{}' as '{}'.\n\
             Type messages and press Enter to send. Press Ctrl+C to exit.\n\
             ============================================================\n",
            room, name
        )
    }

    /// Format a chat message from another participant
    ///
    /// # Arguments
    ///
    /// * `name` - Display name of the sender
    /// * `text` - Message text
    /// * `received_at` - Unix timestamp when the message arrived (milliseconds)
    pub fn format_chat_message(name: &str, text: &str, received_at: i64) -> String {
        format!(
            "\n[{}] {}: {}\n",
            millis_to_local_clock(received_at),
            name,
            text
        )
    }

    /// Format a message this client sent
    ///
    /// The server never echoes a message back to its sender, so it is rendered locally.
    pub fn format_own_message(name: &str, text: &str, sent_at: i64) -> String {
        format!(
            "[{}] {} (me): {}\n",
            millis_to_local_clock(sent_at),
            name,
            text
        )
    }

    /// Format a text frame that is not a chat message
    pub fn format_raw_message(text: &str) -> String {
        format!("\n[raw] {}\n", text)
    }

    /// Format a binary frame notice
    pub fn format_binary_message(len: usize) -> String {
        format!("\n[binary] {} bytes\n", len)
    }
}
