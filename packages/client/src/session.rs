//! WebSocket client session management.

use futures_util::{SinkExt, StreamExt};
use relay_server::infrastructure::dto::websocket::{ChatBroadcastMessage, OutboundClientFrame};
use relay_shared::time::now_millis;
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use super::{error::ClientError, formatter::MessageFormatter, ui::redisplay_prompt};

/// Run one WebSocket session: connect, join the room, then relay input lines
///
/// # Arguments
///
/// * `url` - WebSocket URL of the relay server
/// * `room` - Room to join
/// * `name` - Display name
/// * `prompt` - Prompt redisplayed after asynchronous output
/// * `input_rx` - Lines typed by the user
///
/// # Returns
///
/// * `Ok(())` - The input channel closed (the user exited)
/// * `Err(ClientError)` - The connection failed or was lost
pub async fn run_client_session(
    url: &str,
    room: &str,
    name: &str,
    prompt: &str,
    input_rx: &mut mpsc::UnboundedReceiver<String>,
) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(url)
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;
    tracing::info!("Connected to relay server at {}", url);

    let (mut write, mut read) = ws_stream.split();

    // join は接続直後に送る（応答フレームはない）
    let join = serde_json::to_string(&OutboundClientFrame::join(room, name))?;
    write
        .send(Message::text(join))
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;
    print!("{}", MessageFormatter::format_joined(room, name));
    redisplay_prompt(prompt);

    // Spawn a task to handle incoming frames
    let prompt_for_read = prompt.to_string();
    let mut read_task = tokio::spawn(async move {
        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    let formatted = match serde_json::from_str::<ChatBroadcastMessage>(text.as_str()) {
                        Ok(chat) => {
                            MessageFormatter::format_chat_message(&chat.name, &chat.text, now_millis())
                        }
                        Err(_) => MessageFormatter::format_raw_message(text.as_str()),
                    };
                    print!("{}", formatted);
                    redisplay_prompt(&prompt_for_read);
                }
                Ok(Message::Binary(data)) => {
                    print!("{}", MessageFormatter::format_binary_message(data.len()));
                    redisplay_prompt(&prompt_for_read);
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    break;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    break;
                }
                _ => {}
            }
        }
    });

    // Relay input lines as chat frames
    let write_loop = async {
        while let Some(line) = input_rx.recv().await {
            let json = serde_json::to_string(&OutboundClientFrame::chat(line.as_str()))?;
            write
                .send(Message::text(json))
                .await
                .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

            // The relay does not echo back to the sender
            print!(
                "{}",
                MessageFormatter::format_own_message(name, &line, now_millis())
            );
            redisplay_prompt(prompt);
        }

        let _ = write.close().await;
        Ok::<(), ClientError>(())
    };

    tokio::select! {
        _ = &mut read_task => Err(ClientError::ConnectionLost),
        write_result = write_loop => {
            read_task.abort();
            write_result
        }
    }
}
