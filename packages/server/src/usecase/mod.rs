//! UseCase layer: one struct per relay operation.

pub mod connect_participant;
pub mod disconnect_participant;
pub mod error;
pub mod join_room;
pub mod list_rooms;
pub mod send_message;

pub use connect_participant::ConnectParticipantUseCase;
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use error::SendMessageError;
pub use join_room::JoinRoomUseCase;
pub use list_rooms::{ListRoomsUseCase, RoomSummary};
pub use send_message::{Delivery, SendMessageUseCase};
