//! Shared application state.

use std::sync::Arc;

use crate::usecase::{
    ConnectParticipantUseCase, DisconnectParticipantUseCase, JoinRoomUseCase, ListRoomsUseCase,
    SendMessageUseCase,
};

/// Shared application state
pub struct AppState {
    /// 接続受付のユースケース
    pub connect_participant_usecase: Arc<ConnectParticipantUseCase>,
    /// ルーム参加のユースケース
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    /// メッセージ中継のユースケース
    pub send_message_usecase: Arc<SendMessageUseCase>,
    /// 切断のユースケース
    pub disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    /// ルーム一覧取得のユースケース
    pub list_rooms_usecase: Arc<ListRoomsUseCase>,
}
