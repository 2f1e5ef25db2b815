//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続ごとの `UnboundedSender` を管理
//! - 接続へのフレーム送信（push_to, broadcast）
//!
//! ## 設計ノート
//!
//! WebSocket の受付と sender の生成は UI 層（`ui::handler::websocket`）で行われます。
//! 送信はチャネルへの投入のみで、配送完了は待ちません。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, MessagePushError, MessagePusher, PusherChannel};

/// WebSocket を使った MessagePusher 実装
#[derive(Default)]
pub struct WebSocketMessagePusher {
    /// 接続中のクライアントの送信チャネル
    clients: Arc<Mutex<HashMap<ConnectionId, PusherChannel>>>,
}

impl WebSocketMessagePusher {
    pub fn new(clients: Arc<Mutex<HashMap<ConnectionId, PusherChannel>>>) -> Self {
        Self { clients }
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        clients.insert(connection_id, sender);
        tracing::debug!("Connection '{}' registered to MessagePusher", connection_id);
    }

    async fn unregister_client(&self, connection_id: &ConnectionId) {
        let mut clients = self.clients.lock().await;
        if clients.remove(connection_id).is_some() {
            tracing::debug!(
                "Connection '{}' unregistered from MessagePusher",
                connection_id
            );
        }
    }

    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        content: &str,
    ) -> Result<(), MessagePushError> {
        let clients = self.clients.lock().await;

        let sender = clients
            .get(connection_id)
            .ok_or(MessagePushError::ClientNotFound(*connection_id))?;
        sender
            .send(content.to_string())
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::debug!("Pushed message to connection '{}'", connection_id);
        Ok(())
    }

    async fn broadcast(&self, targets: &[ConnectionId], content: &str) -> usize {
        let clients = self.clients.lock().await;
        let mut delivered = 0;

        for target in targets {
            match clients.get(target) {
                // 宛先ごとの失敗は許容し、残りの宛先への送信を続ける
                Some(sender) => match sender.send(content.to_string()) {
                    Ok(()) => delivered += 1,
                    Err(e) => {
                        tracing::warn!("Failed to push message to connection '{}': {}", target, e)
                    }
                },
                None => tracing::warn!(
                    "Connection '{}' not found during broadcast, skipping",
                    target
                ),
            }
        }

        delivered
    }
}
