//! ParticipantRegistry trait 定義
//!
//! 接続 ID から参加者（ルームと表示名）へのマッピングを管理するインターフェース。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{
    entity::{JoinOutcome, Participant},
    value_object::{ConnectionId, RoomId},
};

/// Registry of joined connections
///
/// Every entry belongs to a live connection. Room membership is derived from
/// the entries, there is no separate room index to keep consistent.
#[async_trait]
pub trait ParticipantRegistry: Send + Sync {
    /// 参加者を登録（同じ接続の既存エントリは上書き）
    async fn join(&self, participant: Participant) -> JoinOutcome;

    /// 接続に対応する参加者を取得
    async fn find(&self, connection_id: &ConnectionId) -> Option<Participant>;

    /// 参加者を削除
    ///
    /// 存在しない接続の削除は何もせず `None` を返す（冪等）。
    async fn remove(&self, connection_id: &ConnectionId) -> Option<Participant>;

    /// 指定ルームの参加者のうち、指定接続以外の接続 ID を取得
    async fn room_peers(&self, room_id: &RoomId, exclude: &ConnectionId) -> Vec<ConnectionId>;

    /// 全ての参加者を取得
    async fn participants(&self) -> Vec<Participant>;

    /// 参加者数を取得
    async fn count(&self) -> usize;
}
