//! WebSocket message DTOs.

use serde::{Deserialize, Serialize};

/// Client → server event envelope.
///
/// Internally tagged on `type`. Unknown types and missing fields fail to
/// deserialize, which the session handler treats as "ignore".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientEvent {
    LaunchClick {
        #[serde(rename = "userId")]
        user_id: String,
    },
    RevealNow,
    Reset,
}

/// Server → client snapshot of the full launch state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchStateMessage {
    pub click_count: usize,
    pub is_launched: bool,
    pub participants: Vec<String>,
    /// ISO-8601 (UTC), `null` until launched
    pub launch_time: Option<String>,
    pub reveal_complete: bool,
}
