//! Room-based WebSocket chat relay server.
//!
//! Clients join a room with a display name and exchange messages with everyone
//! else in the same room.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin relay-server
//! cargo run --bin relay-server -- --host 127.0.0.1 --port 3000
//! PORT=3000 cargo run --bin relay-server
//! ```

use std::sync::Arc;

use clap::Parser;
use relay_server::{
    infrastructure::{message_pusher::WebSocketMessagePusher, registry::InMemoryParticipantRegistry},
    ui::Server,
    usecase::{
        ConnectParticipantUseCase, DisconnectParticipantUseCase, JoinRoomUseCase,
        ListRoomsUseCase, SendMessageUseCase,
    },
};
use relay_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "relay-server")]
#[command(about = "Room-based WebSocket chat relay", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "RELAY_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value = "8080")]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Registry
    // 2. MessagePusher
    // 3. UseCases
    // 4. Server

    // 1. Create the participant registry (in-memory)
    let registry = Arc::new(InMemoryParticipantRegistry::default());

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::default());

    // 3. Create UseCases
    let connect_participant_usecase =
        Arc::new(ConnectParticipantUseCase::new(message_pusher.clone()));
    let join_room_usecase = Arc::new(JoinRoomUseCase::new(registry.clone()));
    let send_message_usecase = Arc::new(SendMessageUseCase::new(
        registry.clone(),
        message_pusher.clone(),
    ));
    let disconnect_participant_usecase = Arc::new(DisconnectParticipantUseCase::new(
        registry.clone(),
        message_pusher.clone(),
    ));
    let list_rooms_usecase = Arc::new(ListRoomsUseCase::new(registry.clone()));

    // 4. Create and run the server
    let server = Server::new(
        connect_participant_usecase,
        join_room_usecase,
        send_message_usecase,
        disconnect_participant_usecase,
        list_rooms_usecase,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
