//! Real-time launch counter server.
//!
//! Clients connect over WebSocket, submit "launch click" events identified by
//! an opaque user token, and receive the full shared launch state every time
//! it changes. Twenty distinct participants flip the state to launched.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
