//! UseCase: 切断処理
//!
//! close と error のどちらで終了しても同じ経路で 1 回だけ呼ばれる想定ですが、
//! 重複して呼ばれてもエラーにはなりません（冪等）。ルームのピアへの退出通知は行いません。

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, Participant, ParticipantRegistry};

/// 切断のユースケース
pub struct DisconnectParticipantUseCase {
    registry: Arc<dyn ParticipantRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectParticipantUseCase {
    pub fn new(
        registry: Arc<dyn ParticipantRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    /// 切断を実行
    ///
    /// # Returns
    ///
    /// 削除された参加者（join していなかった、または削除済みなら `None`）
    pub async fn execute(&self, connection_id: &ConnectionId) -> Option<Participant> {
        let removed = self.registry.remove(connection_id).await;
        self.message_pusher.unregister_client(connection_id).await;
        removed
    }
}
