//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// Response of `GET /api/status`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusDto {
    pub connected_clients: usize,
    pub click_count: usize,
    pub launch_threshold: usize,
    pub is_launched: bool,
}
