//! Client execution logic with reconnection support.

use std::time::Duration;

use super::{error::ClientError, session::run_client_session, ui::spawn_line_reader};

const MAX_RECONNECT_ATTEMPTS: u32 = 5;
const RECONNECT_INTERVAL_SECS: u64 = 5;

/// Trim the room and name, rejecting empty values
pub fn validate_identity(room: &str, name: &str) -> Result<(String, String), ClientError> {
    let room = room.trim();
    let name = name.trim();
    if room.is_empty() {
        return Err(ClientError::EmptyField("room"));
    }
    if name.is_empty() {
        return Err(ClientError::EmptyField("name"));
    }
    Ok((room.to_string(), name.to_string()))
}

/// Run the chat client with reconnection logic
///
/// Every reconnection joins the same room again under the same name.
pub async fn run_client(url: String, room: String, name: String) -> Result<(), ClientError> {
    let (room, name) = validate_identity(&room, &name)?;
    let prompt = format!("{}@{}> ", name, room);
    let mut input_rx = spawn_line_reader(prompt.clone());
    let mut reconnect_count = 0;

    loop {
        tracing::info!(
            "Attempting to connect to {} as '{}' in room '{}' (attempt {}/{})",
            url,
            name,
            room,
            reconnect_count + 1,
            MAX_RECONNECT_ATTEMPTS
        );

        match run_client_session(&url, &room, &name, &prompt, &mut input_rx).await {
            Ok(()) => {
                tracing::info!("Client session ended normally");
                break;
            }
            Err(e) => {
                tracing::warn!("Connection lost: {}", e);
                reconnect_count += 1;

                if reconnect_count >= MAX_RECONNECT_ATTEMPTS {
                    return Err(ClientError::ReconnectExhausted(MAX_RECONNECT_ATTEMPTS));
                }

                tracing::info!(
                    "Reconnecting in {} seconds... (attempt {}/{})",
                    RECONNECT_INTERVAL_SECS,
                    reconnect_count + 1,
                    MAX_RECONNECT_ATTEMPTS
                );

                tokio::time::sleep(Duration::from_secs(RECONNECT_INTERVAL_SECS)).await;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_identity_trims_values() {
        // テスト項目: ルームと名前の前後の空白が取り除かれる
        // given (前提条件):
        let (room, name) = ("  r1 ", "\tAnn\n");

        // when (操作):
        let result = validate_identity(room, name).unwrap();

        // then (期待する結果):
        assert_eq!(result, ("r1".to_string(), "Ann".to_string()));
    }

    #[test]
    fn test_validate_identity_rejects_blank_room() {
        // テスト項目: 空白のみのルームは拒否される
        // given (前提条件):
        let (room, name) = ("   ", "Ann");

        // when (操作):
        let result = validate_identity(room, name);

        // then (期待する結果):
        assert!(matches!(result, Err(ClientError::EmptyField("room"))));
    }

    #[test]
    fn test_validate_identity_rejects_blank_name() {
        // テスト項目: 空の名前は拒否される
        // given (前提条件):
        let (room, name) = ("r1", "");

        // when (操作):
        let result = validate_identity(room, name);

        // then (期待する結果):
        assert!(matches!(result, Err(ClientError::EmptyField("name"))));
    }
}
