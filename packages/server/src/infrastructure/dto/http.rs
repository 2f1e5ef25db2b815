//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// One room with at least one participant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSummaryDto {
    pub id: String,
    /// Display names, in join order
    pub participants: Vec<String>,
    pub participant_count: usize,
}

/// Health check response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthDto {
    pub status: String,
}

/// Error body returned by the HTTP fallback
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDto {
    pub error: String,
}
