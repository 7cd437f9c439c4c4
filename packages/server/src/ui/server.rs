//! Server execution logic.

use std::{future::Future, sync::Arc, time::Duration};

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::usecase::{
    ApplyEventUseCase, ConnectClientUseCase, DisconnectClientUseCase, GetLaunchStateUseCase,
};

use super::{
    handler::{
        http::{debug_state, get_status, health_check},
        websocket::websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
    status_reporter::spawn_status_reporter,
};

/// Runtime configuration of the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
    /// Period of the status log line (zero disables it)
    pub status_interval: Duration,
    /// Upper bound for writing one frame to a socket
    pub send_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 10000,
            status_interval: Duration::from_secs(30),
            send_timeout: Duration::from_secs(5),
        }
    }
}

/// Launch counter server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     connect_client_usecase,
///     disconnect_client_usecase,
///     apply_event_usecase,
///     get_launch_state_usecase,
///     ServerConfig::default(),
/// );
/// server.run().await?;
/// ```
pub struct Server {
    connect_client_usecase: Arc<ConnectClientUseCase>,
    disconnect_client_usecase: Arc<DisconnectClientUseCase>,
    apply_event_usecase: Arc<ApplyEventUseCase>,
    get_launch_state_usecase: Arc<GetLaunchStateUseCase>,
    config: ServerConfig,
}

impl Server {
    pub fn new(
        connect_client_usecase: Arc<ConnectClientUseCase>,
        disconnect_client_usecase: Arc<DisconnectClientUseCase>,
        apply_event_usecase: Arc<ApplyEventUseCase>,
        get_launch_state_usecase: Arc<GetLaunchStateUseCase>,
        config: ServerConfig,
    ) -> Self {
        Self {
            connect_client_usecase,
            disconnect_client_usecase,
            apply_event_usecase,
            get_launch_state_usecase,
            config,
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the axum router
    pub fn router(&self) -> Router {
        let app_state = Arc::new(AppState {
            connect_client_usecase: self.connect_client_usecase.clone(),
            disconnect_client_usecase: self.disconnect_client_usecase.clone(),
            apply_event_usecase: self.apply_event_usecase.clone(),
            get_launch_state_usecase: self.get_launch_state_usecase.clone(),
            send_timeout: self.config.send_timeout,
        });

        Router::new()
            // WebSocket エンドポイント
            .route("/", get(websocket_handler))
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/status", get(get_status))
            .route("/debug/state", get(debug_state))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    ///
    /// Also runs the periodic status reporter for the lifetime of the server.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = self.router();
        let reporter = spawn_status_reporter(
            self.get_launch_state_usecase.clone(),
            self.config.status_interval,
        );

        let result = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await;

        if let Some(reporter) = reporter {
            reporter.abort();
        }
        result
    }

    /// Bind to the configured address and run until Ctrl+C / SIGTERM.
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the configured address or
    /// if there's an error during server execution.
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = format!("{}:{}", self.config.host, self.config.port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!(
            "Launch counter server listening on {}",
            listener.local_addr()?
        );
        tracing::info!("Connect to: ws://{}/", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
