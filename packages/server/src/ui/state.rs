//! Shared state handed to every axum handler.

use std::{sync::Arc, time::Duration};

use crate::usecase::{
    ApplyEventUseCase, ConnectClientUseCase, DisconnectClientUseCase, GetLaunchStateUseCase,
};

/// Shared application state
pub struct AppState {
    /// ConnectClientUseCase（接続のユースケース）
    pub connect_client_usecase: Arc<ConnectClientUseCase>,
    /// DisconnectClientUseCase（切断のユースケース）
    pub disconnect_client_usecase: Arc<DisconnectClientUseCase>,
    /// ApplyEventUseCase（イベント適用のユースケース）
    pub apply_event_usecase: Arc<ApplyEventUseCase>,
    /// GetLaunchStateUseCase（状態取得のユースケース）
    pub get_launch_state_usecase: Arc<GetLaunchStateUseCase>,
    /// Upper bound for writing one frame to a socket
    pub send_timeout: Duration,
}
