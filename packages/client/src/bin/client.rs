//! Terminal chat client for the room relay.
//!
//! Joins a room under a display name, sends each typed line as a chat message
//! and prints messages from the other participants of the room.
//! Automatically reconnects and re-joins on disconnection (max 5 attempts with
//! 5 second interval).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin relay-client -- --room lobby --name Ann
//! cargo run --bin relay-client -- -r lobby -n Bob -u ws://127.0.0.1:3000/ws
//! ```

use clap::Parser;
use relay_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "relay-client")]
#[command(about = "Terminal chat client for the room relay", long_about = None)]
struct Args {
    /// Room to join
    #[arg(short = 'r', long)]
    room: String,

    /// Display name shown to the other participants
    #[arg(short = 'n', long)]
    name: String,

    /// WebSocket server URL
    #[arg(short = 'u', long, env = "RELAY_URL", default_value = "ws://127.0.0.1:8080/ws")]
    url: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    if let Err(e) = relay_client::run_client(args.url, args.room, args.name).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
