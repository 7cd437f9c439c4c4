//! UseCase: 現在の状態の取得（読み取り専用）

use std::sync::Arc;

use crate::domain::{LaunchState, LaunchStateRepository, MessagePusher};

/// Read-only view used by the status reporter and the HTTP endpoints
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchStatus {
    pub state: LaunchState,
    pub connected_clients: usize,
}

/// 状態取得のユースケース
pub struct GetLaunchStateUseCase {
    repository: Arc<dyn LaunchStateRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl GetLaunchStateUseCase {
    pub fn new(
        repository: Arc<dyn LaunchStateRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    pub async fn execute(&self) -> LaunchState {
        self.repository.get_state().await
    }

    pub async fn status(&self) -> LaunchStatus {
        LaunchStatus {
            state: self.repository.get_state().await,
            connected_clients: self.message_pusher.count_clients().await,
        }
    }
}
