//! UseCase: ルーム参加処理
//!
//! ## 何をテストしているか
//! - JoinRoomUseCase::execute() による参加者の登録
//! - 同じ接続からの 2 回目の join（後勝ちで上書き）
//!
//! ## 設計ノート
//! - roomId と name は検証せずそのまま保存する（空文字も受け付ける）
//! - join に対する応答フレームは送らない

use std::sync::Arc;

use relay_shared::time::now_millis;

use crate::domain::{
    ConnectionId, DisplayName, JoinOutcome, Participant, ParticipantRegistry, RoomId, Timestamp,
};

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    registry: Arc<dyn ParticipantRegistry>,
}

impl JoinRoomUseCase {
    pub fn new(registry: Arc<dyn ParticipantRegistry>) -> Self {
        Self { registry }
    }

    /// 参加を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - join フレームを送った接続
    /// * `room_id` - 参加するルーム
    /// * `name` - 表示名
    ///
    /// # Returns
    ///
    /// 新規参加か、既存の参加を上書きしたか
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        room_id: RoomId,
        name: DisplayName,
    ) -> JoinOutcome {
        let participant = Participant::new(
            connection_id,
            room_id,
            name,
            Timestamp::new(now_millis()),
        );
        self.registry.join(participant).await
    }
}
