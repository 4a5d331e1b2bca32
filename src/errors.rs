// errors.rs
use thiserror::Error;

/// Errors surfaced by route handlers. Data-layer failures never reach
/// this type; the aggregator turns them into static data first.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,
    #[error("Bad Request: {0}")]
    BadRequest(String),
    #[error("Internal Server Error: {0}")]
    Internal(String),
}

impl ServerError {
    pub fn status(&self) -> u16 {
        match self {
            ServerError::NotFound => 404,
            ServerError::BadRequest(_) => 400,
            ServerError::Internal(_) => 500,
        }
    }

    /// Text safe to show a client. Internal details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            ServerError::Internal(_) => "Internal Server Error".to_string(),
            other => other.to_string(),
        }
    }
}
