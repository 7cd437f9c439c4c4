//! Registry of open WebSocket connections.
//!
//! Iteration always works on a copy of the member set, so a connection that
//! registers or unregisters while a fan-out is running never invalidates it.

use std::collections::HashMap;

use tokio::sync::Mutex;

use crate::domain::{ConnectionId, PusherChannel};

#[derive(Default)]
pub struct ConnectionRegistry {
    connections: Mutex<HashMap<ConnectionId, PusherChannel>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a connection. Each accepted socket mints a fresh id, so an existing
    /// entry is simply replaced.
    pub async fn register(&self, connection_id: ConnectionId, sender: PusherChannel) {
        let mut connections = self.connections.lock().await;
        connections.insert(connection_id, sender);
    }

    /// Remove a connection. Returns whether it was registered.
    pub async fn unregister(&self, connection_id: &ConnectionId) -> bool {
        let mut connections = self.connections.lock().await;
        connections.remove(connection_id).is_some()
    }

    pub async fn get(&self, connection_id: &ConnectionId) -> Option<PusherChannel> {
        let connections = self.connections.lock().await;
        connections.get(connection_id).cloned()
    }

    /// Copy of the current members.
    pub async fn snapshot(&self) -> Vec<(ConnectionId, PusherChannel)> {
        let connections = self.connections.lock().await;
        connections
            .iter()
            .map(|(id, sender)| (*id, sender.clone()))
            .collect()
    }

    /// Apply `f` to a snapshot of the currently open connections.
    ///
    /// The lock is released before `f` runs.
    pub async fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&ConnectionId, &PusherChannel),
    {
        for (connection_id, sender) in self.snapshot().await {
            if sender.is_closed() {
                continue;
            }
            f(&connection_id, &sender);
        }
    }

    pub async fn len(&self) -> usize {
        self.connections.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
