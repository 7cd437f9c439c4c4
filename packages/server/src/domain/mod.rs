//! Domain layer: launch state, value objects and the ports the use cases depend on.

pub mod entity;
pub mod error;
pub mod message_pusher;
pub mod repository;
pub mod value_object;

pub use entity::{LAUNCH_THRESHOLD, LaunchEvent, LaunchState};
pub use error::MessagePushError;
pub use message_pusher::{MessagePusher, PusherChannel};
#[cfg(test)]
pub use message_pusher::MockMessagePusher;
pub use repository::LaunchStateRepository;
pub use value_object::{ConnectionId, ParticipantToken, Timestamp};
