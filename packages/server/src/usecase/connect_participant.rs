//! UseCase: 接続受付処理
//!
//! 接続直後は参加者を作成しません（join は別の明示的なステップ）。
//! 送信チャネルを MessagePusher に登録するのみです。

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, PusherChannel};

/// 接続受付のユースケース
pub struct ConnectParticipantUseCase {
    message_pusher: Arc<dyn MessagePusher>,
}

impl ConnectParticipantUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// 接続を受け付け、新しい接続 ID を払い出す
    pub async fn execute(&self, sender: PusherChannel) -> ConnectionId {
        let connection_id = ConnectionId::generate();
        self.message_pusher
            .register_client(connection_id, sender)
            .await;
        connection_id
    }
}
