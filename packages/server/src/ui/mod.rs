//! UI layer: axum server, WebSocket sessions, HTTP endpoints and the status reporter.

mod handler;
mod server;
mod signal;
pub mod state;
pub mod status_reporter;

pub use handler::websocket::parse_event;
pub use server::{Server, ServerConfig};
