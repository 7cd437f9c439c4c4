//! UseCase: クライアント切断処理

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher};

/// クライアント切断のユースケース
///
/// 接続を登録解除するだけで、LaunchState には触れない。
/// 参加者トークンは接続に紐付かないため、切断後も participants に残る。
pub struct DisconnectClientUseCase {
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectClientUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// 切断を実行し、残りの接続数を返す
    pub async fn execute(&self, connection_id: &ConnectionId) -> usize {
        self.message_pusher.unregister_client(connection_id).await;
        self.message_pusher.count_clients().await
    }
}
