//! MessagePusher trait 定義
//!
//! 接続へのフレーム送信を抽象化します。WebSocket による実装は
//! `infrastructure::message_pusher` にあります。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{error::MessagePushError, value_object::ConnectionId};

/// Outbound channel of one connection; its receiver is drained into the socket
pub type PusherChannel = mpsc::UnboundedSender<String>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 接続の送信チャネルを登録
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// 接続の送信チャネルを登録解除（存在しなければ何もしない）
    async fn unregister_client(&self, connection_id: &ConnectionId);

    /// 特定の接続にフレームを送信
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        content: &str,
    ) -> Result<(), MessagePushError>;

    /// 複数の接続にフレームを送信
    ///
    /// 宛先ごとの失敗は他の宛先への送信に影響しない。実際に送信できた宛先数を返す。
    async fn broadcast(&self, targets: &[ConnectionId], content: &str) -> usize;
}
