//! UseCase: クライアント接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectClientUseCase::execute() メソッド
//! - 接続の登録と、現在のスナップショットの個別送信
//!
//! ### なぜこのテストが必要か
//! - 遅れて接続したクライアントも即座に最新状態へ同期される必要がある
//! - 初回スナップショットは新規接続にだけ届き、ブロードキャストされてはならない

use std::sync::Arc;

use crate::{
    domain::{ConnectionId, LaunchState, LaunchStateRepository, MessagePusher, PusherChannel},
    infrastructure::dto::websocket::LaunchStateMessage,
};

use super::{DispatchLock, error::ConnectError};

/// クライアント接続のユースケース
pub struct ConnectClientUseCase {
    repository: Arc<dyn LaunchStateRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    dispatch_lock: DispatchLock,
}

impl ConnectClientUseCase {
    pub fn new(
        repository: Arc<dyn LaunchStateRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        dispatch_lock: DispatchLock,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            dispatch_lock,
        }
    }

    /// 接続を登録し、現在の LaunchState をその接続にだけ送信する
    ///
    /// # Returns
    ///
    /// * `Ok(LaunchState)` - 送信したスナップショット
    /// * `Err(ConnectError)` - エンコードまたは送信に失敗（接続は登録解除される）
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        sender: PusherChannel,
    ) -> Result<LaunchState, ConnectError> {
        let _guard = self.dispatch_lock.lock().await;

        self.message_pusher
            .register_client(connection_id, sender)
            .await;

        let state = self.repository.get_state().await;
        let result = match serde_json::to_string(&LaunchStateMessage::from(&state)) {
            Ok(json) => self
                .message_pusher
                .push_to(&connection_id, &json)
                .await
                .map_err(ConnectError::from),
            Err(e) => Err(ConnectError::from(e)),
        };

        if let Err(e) = result {
            self.message_pusher.unregister_client(&connection_id).await;
            return Err(e);
        }

        Ok(state)
    }
}
