//! axum handlers.

pub mod http;
pub mod websocket;
