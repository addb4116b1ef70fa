use thiserror::Error;

/// Errors that can occur while recording motion data
#[derive(Error, Debug)]
pub enum RecorderError {
    #[error("username must not be empty")]
    EmptyUsername,

    #[error("session duration must be a positive number of minutes (got {0})")]
    InvalidDuration(u64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
