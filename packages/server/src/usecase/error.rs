//! UseCase errors.

use thiserror::Error;

use crate::domain::MessagePushError;

/// Errors of [`super::ConnectClientUseCase`]
#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("failed to encode launch state: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to send initial snapshot: {0}")]
    Push(#[from] MessagePushError),
}

/// Errors of [`super::ApplyEventUseCase`]
#[derive(Debug, Error)]
pub enum ApplyEventError {
    #[error("failed to encode launch state: {0}")]
    Encode(#[from] serde_json::Error),
}
