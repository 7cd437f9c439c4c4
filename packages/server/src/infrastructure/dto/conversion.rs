//! Conversion logic between DTOs and domain types.

use ignition_shared::time::timestamp_to_iso8601;

use crate::domain::{LaunchEvent, LaunchState, ParticipantToken};
use crate::infrastructure::dto::websocket as dto;

// ========================================
// DTO → Domain
// ========================================

impl From<dto::ClientEvent> for LaunchEvent {
    fn from(event: dto::ClientEvent) -> Self {
        match event {
            dto::ClientEvent::LaunchClick { user_id } => {
                LaunchEvent::Click(ParticipantToken::new(user_id))
            }
            dto::ClientEvent::RevealNow => LaunchEvent::Reveal,
            dto::ClientEvent::Reset => LaunchEvent::Reset,
        }
    }
}

// ========================================
// Domain → DTO
// ========================================

impl From<&LaunchState> for dto::LaunchStateMessage {
    fn from(state: &LaunchState) -> Self {
        Self {
            click_count: state.click_count(),
            is_launched: state.is_launched(),
            participants: state
                .participants()
                .iter()
                .map(|p| p.as_str().to_string())
                .collect(),
            launch_time: state.launch_time().map(|t| timestamp_to_iso8601(t.value())),
            reveal_complete: state.reveal_complete(),
        }
    }
}
