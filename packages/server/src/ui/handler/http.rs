//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};

use crate::{
    infrastructure::dto::http::{ErrorDto, HealthDto, RoomSummaryDto},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<HealthDto> {
    Json(HealthDto {
        status: "ok".to_string(),
    })
}

/// List rooms that currently hold participants
pub async fn list_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let rooms = state.list_rooms_usecase.execute().await;

    // Domain Model から DTO への変換
    let summaries = rooms
        .into_iter()
        .map(|room| RoomSummaryDto {
            id: room.id.into_string(),
            participant_count: room.participants.len(),
            participants: room
                .participants
                .into_iter()
                .map(|p| p.name.into_string())
                .collect(),
        })
        .collect();

    Json(summaries)
}

/// Fallback for any route the server does not serve
pub async fn not_found() -> (StatusCode, Json<ErrorDto>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorDto {
            error: "not found".to_string(),
        }),
    )
}
