mod backend_error;
pub mod client;
pub mod models;

pub use backend_error::{BackendError, ConfigurationError};
pub use client::{create_client, BackendClient, BackendConfig};
pub use models::{AgentRow, PropertyDetailRow, PropertyRow};
