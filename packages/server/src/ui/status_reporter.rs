//! Periodic status log line.

use std::{sync::Arc, time::Duration};

use tokio::task::JoinHandle;

use crate::{
    domain::LAUNCH_THRESHOLD,
    usecase::{GetLaunchStateUseCase, LaunchStatus},
};

/// Spawn the reporter. Returns `None` when `interval` is zero (disabled).
pub fn spawn_status_reporter(
    usecase: Arc<GetLaunchStateUseCase>,
    interval: Duration,
) -> Option<JoinHandle<()>> {
    if interval.is_zero() {
        tracing::info!("Status reporter disabled");
        return None;
    }

    Some(tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // the first tick completes immediately
        ticker.tick().await;
        loop {
            ticker.tick().await;
            if let Some(line) = format_status(&usecase.status().await) {
                tracing::info!("{}", line);
            }
        }
    }))
}

/// Status line, or `None` while nobody is connected.
pub fn format_status(status: &LaunchStatus) -> Option<String> {
    if status.connected_clients == 0 {
        return None;
    }
    Some(format!(
        "Status: {} clients connected, {}/{} participants",
        status.connected_clients,
        status.state.click_count(),
        LAUNCH_THRESHOLD
    ))
}
