//! MessagePusher trait 定義
//!
//! 接続中クライアントの登録（Connection Registry）と、
//! クライアントへのメッセージ送信（Broadcaster）を抽象化します。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ConnectionId, MessagePushError};

/// Outbound channel of one connection.
///
/// The receiving half is drained by the connection's pusher task.
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// MessagePusher trait
///
/// ## 責務
///
/// - 接続の登録・登録解除
/// - 単一の接続への送信（`push_to`）
/// - 全接続への送信（`broadcast`）
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 接続を登録
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// 接続を登録解除（未登録の場合は何もしない）
    async fn unregister_client(&self, connection_id: &ConnectionId);

    /// 特定の接続にメッセージを送信
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        content: &str,
    ) -> Result<(), MessagePushError>;

    /// 登録中の全ての開いている接続にメッセージを送信
    ///
    /// 個々の送信失敗はログに残してスキップする。戻り値は送信できた接続数。
    async fn broadcast(&self, content: &str) -> usize;

    /// 登録中の接続数
    async fn count_clients(&self) -> usize;
}
