//! UseCase: イベント適用とブロードキャスト
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ApplyEventUseCase::execute() メソッド
//! - 状態が変化したときだけブロードキャストされること
//!
//! ### どのような状況を想定しているか
//! - 正常系：クリック・reveal・reset によるブロードキャスト
//! - エッジケース：重複クリック、launch 後のクリック（ブロードキャストなし）
//! - 並行系：20 人が同時にクリックしても launch は一度だけ

use std::sync::Arc;

use ignition_shared::time::Clock;
use tokio::task::JoinHandle;

use crate::{
    domain::{LaunchEvent, LaunchStateRepository, MessagePusher, Timestamp},
    infrastructure::dto::websocket::LaunchStateMessage,
};

use super::{DispatchLock, error::ApplyEventError};

/// Result of applying one event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// The event did not change the state; nothing was sent
    Ignored,
    /// The new snapshot was sent to `delivered` connections
    Broadcast { delivered: usize },
}

/// イベント適用のユースケース
pub struct ApplyEventUseCase {
    repository: Arc<dyn LaunchStateRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
    dispatch_lock: DispatchLock,
}

impl ApplyEventUseCase {
    pub fn new(
        repository: Arc<dyn LaunchStateRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
        dispatch_lock: DispatchLock,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            clock,
            dispatch_lock,
        }
    }

    /// イベントを適用し、状態が変化したら全接続にスナップショットを送信する
    pub async fn execute(&self, event: LaunchEvent) -> Result<EventOutcome, ApplyEventError> {
        let _guard = self.dispatch_lock.lock().await;

        let action = match &event {
            LaunchEvent::Click(token) => format!("Click from {}", token.short()),
            LaunchEvent::Reveal => "Reveal completed".to_string(),
            LaunchEvent::Reset => "Launch reset".to_string(),
        };
        let was_click = matches!(event, LaunchEvent::Click(_));

        let now = Timestamp::new(self.clock.now_millis());
        let Some(state) = self.repository.apply(event, now).await else {
            tracing::debug!("{} ignored: state unchanged", action);
            return Ok(EventOutcome::Ignored);
        };

        tracing::info!(
            "{} - Count: {}, Launched: {}, Participants: {}",
            action,
            state.click_count(),
            state.is_launched(),
            state.participants().len()
        );
        if was_click && state.is_launched() {
            tracing::info!(
                "Launch threshold reached with {} participants",
                state.click_count()
            );
        }

        let json = serde_json::to_string(&LaunchStateMessage::from(&state))?;
        let delivered = self.message_pusher.broadcast(&json).await;
        tracing::info!("Broadcasting to {} clients", delivered);

        Ok(EventOutcome::Broadcast { delivered })
    }

    /// Run [`Self::execute`] on its own task.
    ///
    /// Aborting the caller, or dropping the handle, does not stop the apply
    /// or its broadcast.
    pub fn spawn_execute(
        self: Arc<Self>,
        event: LaunchEvent,
    ) -> JoinHandle<Result<EventOutcome, ApplyEventError>> {
        tokio::spawn(async move { self.execute(event).await })
    }
}
