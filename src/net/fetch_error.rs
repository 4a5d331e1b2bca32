use crate::net::TransportError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// The connectivity probe reported no outbound network. No attempt was made.
    #[error("no network connectivity")]
    Offline,

    #[error("network error after {attempts} attempts: {last}")]
    Network {
        attempts: u32,
        #[source]
        last: TransportError,
    },
}
