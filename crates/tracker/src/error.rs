//! Tracker errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackerError {
    /// Timers need a tokio runtime to run on
    #[error("backup tracker must be created inside a tokio runtime")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),
}

pub type Result<T> = std::result::Result<T, TrackerError>;
