use thiserror::Error;

/// Errors produced when decoding log payloads.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LogError {
    #[error("log payload is not a JSON array of entries")]
    NotAnArray,

    #[error("invalid log entry: {0}")]
    InvalidEntry(String),
}
