//! Repository trait 定義
//!
//! ドメイン層が必要とする状態アクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{LaunchEvent, LaunchState, Timestamp};

/// LaunchState Repository trait
///
/// UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には依存しない。
#[async_trait]
pub trait LaunchStateRepository: Send + Sync {
    /// 現在の LaunchState のスナップショットを取得
    async fn get_state(&self) -> LaunchState;

    /// イベントを適用
    ///
    /// 状態が変化した場合は変化後のスナップショットを返し、
    /// 変化しなかった場合は `None` を返す。
    async fn apply(&self, event: LaunchEvent, now: Timestamp) -> Option<LaunchState>;
}
