//! InMemory LaunchState Repository 実装
//!
//! ドメイン層が定義する LaunchStateRepository trait の具体的な実装。
//! プロセス内の単一の LaunchState を Mutex で保護して保持します。
//! 永続化は行わないため、プロセス再起動で初期状態に戻ります。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{LaunchEvent, LaunchState, LaunchStateRepository, Timestamp};

/// インメモリ LaunchState Repository 実装
pub struct InMemoryLaunchStateRepository {
    state: Arc<Mutex<LaunchState>>,
}

impl InMemoryLaunchStateRepository {
    pub fn new(state: Arc<Mutex<LaunchState>>) -> Self {
        Self { state }
    }
}

impl Default for InMemoryLaunchStateRepository {
    fn default() -> Self {
        Self::new(Arc::new(Mutex::new(LaunchState::new())))
    }
}

#[async_trait]
impl LaunchStateRepository for InMemoryLaunchStateRepository {
    async fn get_state(&self) -> LaunchState {
        self.state.lock().await.clone()
    }

    async fn apply(&self, event: LaunchEvent, now: Timestamp) -> Option<LaunchState> {
        let mut state = self.state.lock().await;
        state.apply(event, now).then(|| state.clone())
    }
}
