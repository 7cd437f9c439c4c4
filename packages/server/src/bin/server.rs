//! Launch counter server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin ignition-server
//! PORT=3000 cargo run --bin ignition-server
//! cargo run --bin ignition-server -- --host 127.0.0.1 --port 3000
//! ```

use std::{sync::Arc, time::Duration};

use clap::Parser;
use ignition_server::{
    domain::LaunchState,
    infrastructure::{
        connection_registry::ConnectionRegistry, message_pusher::WebSocketMessagePusher,
        repository::InMemoryLaunchStateRepository,
    },
    ui::{Server, ServerConfig},
    usecase::{
        ApplyEventUseCase, ConnectClientUseCase, DisconnectClientUseCase, GetLaunchStateUseCase,
        new_dispatch_lock,
    },
};
use ignition_shared::{logger::setup_logger, time::SystemClock};
use tokio::sync::Mutex;

#[derive(Parser, Debug)]
#[command(name = "ignition-server")]
#[command(about = "Real-time launch counter over WebSocket", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value_t = 10000)]
    port: u16,

    /// Seconds between status log lines (0 disables them)
    #[arg(long, env = "STATUS_INTERVAL_SECS", default_value_t = 30)]
    status_interval_secs: u64,

    /// Milliseconds allowed for writing one frame to a client
    #[arg(long, env = "SEND_TIMEOUT_MS", default_value_t = 5000)]
    send_timeout_ms: u64,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            status_interval: Duration::from_secs(args.status_interval_secs),
            send_timeout: Duration::from_millis(args.send_timeout_ms),
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let config = ServerConfig::from(Args::parse());

    // Initialize dependencies in order:
    // 1. Repository
    // 2. MessagePusher
    // 3. UseCases
    // 4. Server

    // 1. Create Repository (in-memory state)
    let launch_state = Arc::new(Mutex::new(LaunchState::new()));
    tracing::info!("Initial launch state: {:?}", launch_state.lock().await);
    let repository = Arc::new(InMemoryLaunchStateRepository::new(launch_state));

    // 2. Create MessagePusher (WebSocket implementation)
    let registry = Arc::new(ConnectionRegistry::new());
    let message_pusher = Arc::new(WebSocketMessagePusher::new(registry));

    // 3. Create UseCases
    let dispatch_lock = new_dispatch_lock();
    let connect_client_usecase = Arc::new(ConnectClientUseCase::new(
        repository.clone(),
        message_pusher.clone(),
        dispatch_lock.clone(),
    ));
    let disconnect_client_usecase = Arc::new(DisconnectClientUseCase::new(message_pusher.clone()));
    let apply_event_usecase = Arc::new(ApplyEventUseCase::new(
        repository.clone(),
        message_pusher.clone(),
        Arc::new(SystemClock),
        dispatch_lock,
    ));
    let get_launch_state_usecase = Arc::new(GetLaunchStateUseCase::new(
        repository.clone(),
        message_pusher.clone(),
    ));

    // 4. Create and run the server
    let server = Server::new(
        connect_client_usecase,
        disconnect_client_usecase,
        apply_event_usecase,
        get_launch_state_usecase,
        config,
    );
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
