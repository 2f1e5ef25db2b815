//! UseCase: チャットメッセージ中継処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - 送信者の検索、同じルームのピアへのブロードキャスト
//!
//! ### なぜこのテストが必要か
//! - ルーム分離：別のルームの参加者には届かない
//! - 自己エコー抑止：送信者自身には届かない
//! - join 前の chat は誰にも届かない
//!
//! ### どのような状況を想定しているか
//! - 正常系：同じルームの全ピアへの配信
//! - エッジケース：送信者のみのルーム、未参加の接続からの chat

use std::sync::Arc;

use crate::{
    domain::{ChatMessage, ConnectionId, MessagePusher, MessageText, ParticipantRegistry},
    infrastructure::dto::websocket::ChatBroadcastMessage,
};

use super::error::SendMessageError;

/// Outcome of relaying one chat frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// The sender never joined; nothing was sent
    NotJoined,
    /// The frame was handed to these peers
    Broadcast {
        targets: Vec<ConnectionId>,
        delivered: usize,
    },
}

/// メッセージ中継のユースケース
pub struct SendMessageUseCase {
    registry: Arc<dyn ParticipantRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl SendMessageUseCase {
    pub fn new(
        registry: Arc<dyn ParticipantRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    /// チャットメッセージを中継
    ///
    /// # Arguments
    ///
    /// * `from` - chat フレームを送った接続
    /// * `text` - メッセージ本文
    ///
    /// # Returns
    ///
    /// * `Ok(Delivery::NotJoined)` - 送信者が join していない（何もしない）
    /// * `Ok(Delivery::Broadcast { .. })` - 同じルームのピアに送信した
    /// * `Err(SendMessageError)` - 送信フレームのエンコードに失敗
    pub async fn execute(
        &self,
        from: ConnectionId,
        text: MessageText,
    ) -> Result<Delivery, SendMessageError> {
        let Some(sender) = self.registry.find(&from).await else {
            return Ok(Delivery::NotJoined);
        };

        let targets = self.registry.room_peers(&sender.room_id, &from).await;
        if targets.is_empty() {
            return Ok(Delivery::Broadcast {
                targets,
                delivered: 0,
            });
        }

        // エンコードは 1 回だけ行い、全ての宛先に同じフレームを送る
        let outgoing = ChatBroadcastMessage::from(ChatMessage::new(sender.name, text));
        let json = serde_json::to_string(&outgoing)?;
        let delivered = self.message_pusher.broadcast(&targets, &json).await;

        Ok(Delivery::Broadcast { targets, delivered })
    }
}
