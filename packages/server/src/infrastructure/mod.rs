//! Infrastructure layer: concrete adapters for the domain ports.

pub mod connection_registry;
pub mod dto;
pub mod message_pusher;
pub mod repository;
