//! InMemory ParticipantRegistry 実装
//!
//! ドメイン層が定義する `ParticipantRegistry` trait の具体的な実装。
//! `HashMap<ConnectionId, Participant>` を単一の Mutex で保護します。
//! ルームごとの参加者は線形走査で求めます。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, JoinOutcome, Participant, ParticipantRegistry, RoomId};

/// インメモリ参加者レジストリ
#[derive(Default)]
pub struct InMemoryParticipantRegistry {
    participants: Arc<Mutex<HashMap<ConnectionId, Participant>>>,
}

impl InMemoryParticipantRegistry {
    pub fn new(participants: Arc<Mutex<HashMap<ConnectionId, Participant>>>) -> Self {
        Self { participants }
    }
}

#[async_trait]
impl ParticipantRegistry for InMemoryParticipantRegistry {
    async fn join(&self, participant: Participant) -> JoinOutcome {
        let mut participants = self.participants.lock().await;
        match participants.insert(participant.connection_id, participant) {
            Some(previous) => JoinOutcome::Rejoined { previous },
            None => JoinOutcome::Joined,
        }
    }

    async fn find(&self, connection_id: &ConnectionId) -> Option<Participant> {
        let participants = self.participants.lock().await;
        participants.get(connection_id).cloned()
    }

    async fn remove(&self, connection_id: &ConnectionId) -> Option<Participant> {
        let mut participants = self.participants.lock().await;
        participants.remove(connection_id)
    }

    async fn room_peers(&self, room_id: &RoomId, exclude: &ConnectionId) -> Vec<ConnectionId> {
        let participants = self.participants.lock().await;
        participants
            .values()
            .filter(|p| &p.room_id == room_id && &p.connection_id != exclude)
            .map(|p| p.connection_id)
            .collect()
    }

    async fn participants(&self) -> Vec<Participant> {
        let participants = self.participants.lock().await;
        participants.values().cloned().collect()
    }

    async fn count(&self) -> usize {
        let participants = self.participants.lock().await;
        participants.len()
    }
}
