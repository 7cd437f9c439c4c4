//! UseCase layer.
//!
//! Every operation that mutates the launch state, and the initial snapshot
//! push on connect, runs while holding the shared [`DispatchLock`]. Applying
//! an event and fanning out its snapshot therefore happen as one unit, and
//! clients receive snapshots in the order the state changed.

mod apply_event;
mod connect_client;
mod disconnect_client;
mod error;
mod get_launch_state;

use std::sync::Arc;

use tokio::sync::Mutex;

pub use apply_event::{ApplyEventUseCase, EventOutcome};
pub use connect_client::ConnectClientUseCase;
pub use disconnect_client::DisconnectClientUseCase;
pub use error::{ApplyEventError, ConnectError};
pub use get_launch_state::{GetLaunchStateUseCase, LaunchStatus};

/// Serializes "apply + broadcast" and "register + initial push".
pub type DispatchLock = Arc<Mutex<()>>;

pub fn new_dispatch_lock() -> DispatchLock {
    Arc::new(Mutex::new(()))
}
