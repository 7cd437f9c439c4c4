//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続ごとの `UnboundedSender` を `ConnectionRegistry` で管理
//! - クライアントへのメッセージ送信（push_to, broadcast）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、メッセージ送信に使用します。
//! 送信はチャンネルへの enqueue のみで完了し、実際のソケット書き込みは
//! 接続ごとの pusher タスクが行うため、遅いクライアントが他の配信を止めることはありません。

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    domain::{ConnectionId, MessagePushError, MessagePusher, PusherChannel},
    infrastructure::connection_registry::ConnectionRegistry,
};

/// WebSocket を使った MessagePusher 実装
pub struct WebSocketMessagePusher {
    /// 接続中のクライアントの WebSocket sender
    registry: Arc<ConnectionRegistry>,
}

impl WebSocketMessagePusher {
    pub fn new(registry: Arc<ConnectionRegistry>) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel) {
        self.registry.register(connection_id, sender).await;
        tracing::debug!("Connection '{}' registered to MessagePusher", connection_id);
    }

    async fn unregister_client(&self, connection_id: &ConnectionId) {
        if self.registry.unregister(connection_id).await {
            tracing::debug!(
                "Connection '{}' unregistered from MessagePusher",
                connection_id
            );
        }
    }

    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        content: &str,
    ) -> Result<(), MessagePushError> {
        let sender = self
            .registry
            .get(connection_id)
            .await
            .ok_or_else(|| MessagePushError::ClientNotFound(connection_id.to_string()))?;

        sender
            .send(content.to_string())
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::debug!("Pushed message to connection '{}'", connection_id);
        Ok(())
    }

    async fn broadcast(&self, content: &str) -> usize {
        let mut delivered = 0;

        self.registry
            .for_each(|connection_id, sender| {
                // ブロードキャストでは一部の送信失敗を許容
                match sender.send(content.to_string()) {
                    Ok(()) => delivered += 1,
                    Err(e) => tracing::warn!(
                        "Failed to push message to connection '{}': {}",
                        connection_id,
                        e
                    ),
                }
            })
            .await;

        tracing::debug!("Broadcasted message to {} connections", delivered);
        delivered
    }

    async fn count_clients(&self) -> usize {
        self.registry.len().await
    }
}
