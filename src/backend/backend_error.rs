use crate::net::FetchError;
use thiserror::Error;

/// Missing or unusable connection settings. Never retried.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("{0} is not set")]
    MissingValue(&'static str),
    #[error("invalid backend url: {0}")]
    InvalidUrl(String),
}

#[derive(Debug, Error)]
pub enum BackendError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("{table} returned HTTP {status}: {body}")]
    Status {
        table: String,
        status: u16,
        body: String,
    },

    #[error("could not decode {table} rows: {message}")]
    Decode { table: String, message: String },
}
