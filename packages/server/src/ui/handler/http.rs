//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{
    domain::LAUNCH_THRESHOLD,
    infrastructure::dto::{http::StatusDto, websocket::LaunchStateMessage},
    ui::state::AppState,
};

/// Debug endpoint returning the same snapshot clients receive
pub async fn debug_state(State(state): State<Arc<AppState>>) -> Json<LaunchStateMessage> {
    let launch_state = state.get_launch_state_usecase.execute().await;
    Json(LaunchStateMessage::from(&launch_state))
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Connection count and launch progress
pub async fn get_status(State(state): State<Arc<AppState>>) -> Json<StatusDto> {
    let status = state.get_launch_state_usecase.status().await;
    Json(StatusDto {
        connected_clients: status.connected_clients,
        click_count: status.state.click_count(),
        launch_threshold: LAUNCH_THRESHOLD,
        is_launched: status.state.is_launched(),
    })
}
