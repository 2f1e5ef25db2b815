//! Server execution logic.

use std::{future::Future, sync::Arc};

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{
    infrastructure::{message_pusher::WebSocketMessagePusher, registry::InMemoryParticipantRegistry},
    usecase::{
        ConnectParticipantUseCase, DisconnectParticipantUseCase, JoinRoomUseCase,
        ListRoomsUseCase, SendMessageUseCase,
    },
};

use super::{
    handler::{health_check, list_rooms, not_found, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// WebSocket relay server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     connect_participant_usecase,
///     join_room_usecase,
///     send_message_usecase,
///     disconnect_participant_usecase,
///     list_rooms_usecase,
/// );
/// server.run("0.0.0.0".to_string(), 8080).await?;
/// ```
pub struct Server {
    connect_participant_usecase: Arc<ConnectParticipantUseCase>,
    join_room_usecase: Arc<JoinRoomUseCase>,
    send_message_usecase: Arc<SendMessageUseCase>,
    disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    list_rooms_usecase: Arc<ListRoomsUseCase>,
}

impl Server {
    /// Create a new Server instance
    pub fn new(
        connect_participant_usecase: Arc<ConnectParticipantUseCase>,
        join_room_usecase: Arc<JoinRoomUseCase>,
        send_message_usecase: Arc<SendMessageUseCase>,
        disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
        list_rooms_usecase: Arc<ListRoomsUseCase>,
    ) -> Self {
        Self {
            connect_participant_usecase,
            join_room_usecase,
            send_message_usecase,
            disconnect_participant_usecase,
            list_rooms_usecase,
        }
    }

    /// Create a server backed by the in-memory registry and the WebSocket pusher
    pub fn in_memory() -> Self {
        let registry = Arc::new(InMemoryParticipantRegistry::default());
        let message_pusher = Arc::new(WebSocketMessagePusher::default());

        Self::new(
            Arc::new(ConnectParticipantUseCase::new(message_pusher.clone())),
            Arc::new(JoinRoomUseCase::new(registry.clone())),
            Arc::new(SendMessageUseCase::new(
                registry.clone(),
                message_pusher.clone(),
            )),
            Arc::new(DisconnectParticipantUseCase::new(
                registry.clone(),
                message_pusher,
            )),
            Arc::new(ListRoomsUseCase::new(registry)),
        )
    }

    /// Build the router
    ///
    /// WebSocket upgrades are served on `/` and `/ws`.
    pub fn router(self) -> Router {
        let app_state = Arc::new(AppState {
            connect_participant_usecase: self.connect_participant_usecase,
            join_room_usecase: self.join_room_usecase,
            send_message_usecase: self.send_message_usecase,
            disconnect_participant_usecase: self.disconnect_participant_usecase,
            list_rooms_usecase: self.list_rooms_usecase,
        });

        Router::new()
            // WebSocket エンドポイント
            .route("/", get(websocket_handler))
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/rooms", get(list_rooms))
            .fallback(not_found)
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Run the relay server until Ctrl+C or SIGTERM
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "0.0.0.0")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;

        self.serve(listener, shutdown_signal()).await?;

        Ok(())
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let local_addr = listener.local_addr()?;
        tracing::info!("WebSocket relay server listening on {}", local_addr);
        tracing::info!("Connect to: ws://{}/ws", local_addr);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
