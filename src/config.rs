// config.rs
use crate::backend::client::{BACKEND_ANON_KEY_VAR, BACKEND_URL_VAR};
use crate::backend::BackendConfig;
use crate::net::{DEFAULT_PROBE_URL, DEFAULT_TIMEOUT};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const BIND_ADDR_VAR: &str = "LISTING_BIND_ADDR";
pub const PROBE_URL_VAR: &str = "CONNECTIVITY_PROBE_URL";
pub const FETCH_TIMEOUT_VAR: &str = "FETCH_TIMEOUT_MS";
pub const LOG_FORMAT_VAR: &str = "LOG_FORMAT";
pub const STATIC_DIR_VAR: &str = "STATIC_DIR";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_STATIC_DIR: &str = "static";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {var}: {value:?} ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub probe_url: String,
    pub json_logs: bool,
    /// Served under `/static/`.
    pub static_dir: PathBuf,
    /// Backend credentials are optional here; `create_client` decides.
    pub backend: BackendConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_raw = get(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw.parse::<SocketAddr>().map_err(|e| ConfigError::Invalid {
            var: BIND_ADDR_VAR,
            value: bind_raw.clone(),
            reason: e.to_string(),
        })?;

        let fetch_timeout = match get(FETCH_TIMEOUT_VAR) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => Duration::from_millis(ms),
                Ok(_) => {
                    return Err(ConfigError::Invalid {
                        var: FETCH_TIMEOUT_VAR,
                        value: raw,
                        reason: "must be positive".into(),
                    })
                }
                Err(e) => {
                    return Err(ConfigError::Invalid {
                        var: FETCH_TIMEOUT_VAR,
                        value: raw,
                        reason: e.to_string(),
                    })
                }
            },
            None => DEFAULT_TIMEOUT,
        };

        Ok(Self {
            bind_addr,
            probe_url: get(PROBE_URL_VAR).unwrap_or_else(|| DEFAULT_PROBE_URL.to_string()),
            json_logs: get(LOG_FORMAT_VAR).is_some_and(|v| v.eq_ignore_ascii_case("json")),
            static_dir: PathBuf::from(
                get(STATIC_DIR_VAR).unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string()),
            ),
            backend: BackendConfig {
                url: get(BACKEND_URL_VAR),
                anon_key: get(BACKEND_ANON_KEY_VAR),
                fetch_timeout,
            },
        })
    }
}
