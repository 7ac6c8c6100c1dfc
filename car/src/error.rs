use thiserror::Error;

use dispatch::{DispatchError, ExploreError};

use crate::config::ConfigError;

/// Anything that stops the car program. All of them are fatal.
#[derive(Debug, Error)]
pub enum CarError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("elevator I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("car halted: {0}")]
    Dispatch(#[from] DispatchError),

    #[error("exploration failed: {0}")]
    Explore(#[from] ExploreError),

    #[error("event channel closed")]
    Disconnected,
}
