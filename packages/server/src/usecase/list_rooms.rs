//! UseCase: ルーム一覧取得
//!
//! 参加者が 1 人以上いるルームを、参加者から導出して返します。

use std::{collections::BTreeMap, sync::Arc};

use crate::domain::{Participant, ParticipantRegistry, RoomId};

/// A room and its current participants, in join order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSummary {
    pub id: RoomId,
    pub participants: Vec<Participant>,
}

/// ルーム一覧取得のユースケース
pub struct ListRoomsUseCase {
    registry: Arc<dyn ParticipantRegistry>,
}

impl ListRoomsUseCase {
    pub fn new(registry: Arc<dyn ParticipantRegistry>) -> Self {
        Self { registry }
    }

    /// ルーム ID 順に並んだルーム一覧を返す
    pub async fn execute(&self) -> Vec<RoomSummary> {
        let mut rooms: BTreeMap<RoomId, Vec<Participant>> = BTreeMap::new();
        for participant in self.registry.participants().await {
            rooms
                .entry(participant.room_id.clone())
                .or_default()
                .push(participant);
        }

        rooms
            .into_iter()
            .map(|(id, mut participants)| {
                participants.sort_by_key(|p| (p.joined_at, p.connection_id));
                RoomSummary { id, participants }
            })
            .collect()
    }
}
