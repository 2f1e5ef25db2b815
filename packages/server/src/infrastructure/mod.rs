//! Infrastructure layer: wire formats and concrete implementations of the domain traits.

pub mod dto;
pub mod message_pusher;
pub mod registry;
