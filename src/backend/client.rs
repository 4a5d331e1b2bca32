// backend/client.rs
use crate::backend::{AgentRow, BackendError, ConfigurationError, PropertyDetailRow, PropertyRow};
use crate::net::{FetchOptions, ResilientFetcher, DEFAULT_TIMEOUT};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::warn;
use url::Url;

pub const BACKEND_URL_VAR: &str = "PROPERTY_BACKEND_URL";
pub const BACKEND_ANON_KEY_VAR: &str = "PROPERTY_BACKEND_ANON_KEY";

const PROPERTIES_TABLE: &str = "properties";
const DETAILS_TABLE: &str = "property_details";
const AGENTS_TABLE: &str = "profiles";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub url: Option<String>,
    pub anon_key: Option<String>,
    pub fetch_timeout: Duration,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: None,
            anon_key: None,
            fetch_timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Session handling flags handed to the auth layer that sits on top of this client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthOptions {
    pub persist_session: bool,
    pub auto_refresh_token: bool,
}

impl Default for AuthOptions {
    fn default() -> Self {
        Self {
            persist_session: true,
            auto_refresh_token: true,
        }
    }
}

/// REST client for the hosted backend. Every call goes through the
/// `ResilientFetcher`, so callers get offline detection and retry for free.
#[derive(Clone)]
pub struct BackendClient {
    rest_url: Url,
    tables: TableUrls,
    anon_key: String,
    timeout: Duration,
    auth: AuthOptions,
    fetcher: ResilientFetcher,
}

/// Table endpoints, resolved once when the client is built.
#[derive(Debug, Clone)]
struct TableUrls {
    properties: Url,
    details: Url,
    agents: Url,
}

/// Builds a client from connection settings.
///
/// Fails before touching the network if the url or anon key is missing.
pub fn create_client(
    config: &BackendConfig,
    fetcher: ResilientFetcher,
) -> Result<BackendClient, ConfigurationError> {
    let url = required(config.url.as_deref(), BACKEND_URL_VAR)?;
    let anon_key = required(config.anon_key.as_deref(), BACKEND_ANON_KEY_VAR)?;

    let base = Url::parse(url).map_err(|e| ConfigurationError::InvalidUrl(format!("{url}: {e}")))?;
    if base.cannot_be_a_base() {
        return Err(ConfigurationError::InvalidUrl(url.to_string()));
    }

    let rest_url = base
        .join(&format!("{}/rest/v1/", base.path().trim_end_matches('/')))
        .map_err(|e| ConfigurationError::InvalidUrl(format!("{url}: {e}")))?;

    let table = |name: &str| {
        rest_url
            .join(name)
            .map_err(|e| ConfigurationError::InvalidUrl(format!("{url}: {e}")))
    };
    let tables = TableUrls {
        properties: table(PROPERTIES_TABLE)?,
        details: table(DETAILS_TABLE)?,
        agents: table(AGENTS_TABLE)?,
    };

    Ok(BackendClient {
        rest_url,
        tables,
        anon_key: anon_key.to_string(),
        timeout: config.fetch_timeout,
        auth: AuthOptions::default(),
        fetcher,
    })
}

fn required<'a>(value: Option<&'a str>, name: &'static str) -> Result<&'a str, ConfigurationError> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(ConfigurationError::MissingValue(name))
}

impl BackendClient {
    pub fn auth_options(&self) -> AuthOptions {
        self.auth
    }

    pub fn rest_url(&self) -> &Url {
        &self.rest_url
    }

    pub fn fetch_properties(&self) -> Result<Vec<PropertyRow>, BackendError> {
        self.select(PROPERTIES_TABLE, &self.tables.properties, &[])
    }

    pub fn fetch_details_for(&self, property_id: i64) -> Result<Vec<PropertyDetailRow>, BackendError> {
        self.select(
            DETAILS_TABLE,
            &self.tables.details,
            &[("property_id", property_id.to_string())],
        )
    }

    pub fn fetch_all_details(&self) -> Result<Vec<PropertyDetailRow>, BackendError> {
        self.select(DETAILS_TABLE, &self.tables.details, &[])
    }

    pub fn fetch_agent(&self, agent_id: &str) -> Result<Option<AgentRow>, BackendError> {
        let rows: Vec<AgentRow> =
            self.select(AGENTS_TABLE, &self.tables.agents, &[("id", agent_id.to_string())])?;
        Ok(rows.into_iter().next())
    }

    pub fn fetch_agents(&self) -> Result<Vec<AgentRow>, BackendError> {
        self.select(AGENTS_TABLE, &self.tables.agents, &[])
    }

    /// `GET {rest}/{table}?select=*&col=eq.value...`
    ///
    /// The body must be a JSON array. Rows that do not fit `T` are logged and
    /// skipped so one malformed row never costs the rest of the batch.
    fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        endpoint: &Url,
        filters: &[(&str, String)],
    ) -> Result<Vec<T>, BackendError> {
        let url = with_filters(endpoint, filters);

        let options = FetchOptions::default()
            .with_timeout(self.timeout)
            .header("apikey", self.anon_key.as_str())
            .header("Authorization", format!("Bearer {}", self.anon_key))
            .header("Accept", mime::APPLICATION_JSON.as_ref());

        let resp = self.fetcher.fetch_with_retry(url.as_str(), &options)?;

        if !resp.is_success() {
            return Err(BackendError::Status {
                table: table.to_string(),
                status: resp.status,
                body: resp.body,
            });
        }

        let rows: Vec<serde_json::Value> =
            serde_json::from_str(&resp.body).map_err(|e| BackendError::Decode {
                table: table.to_string(),
                message: e.to_string(),
            })?;

        let decoded = rows
            .into_iter()
            .enumerate()
            .filter_map(|(index, row)| {
                let id = row.get("id").or_else(|| row.get("property_id")).cloned();
                match serde_json::from_value(row) {
                    Ok(value) => Some(value),
                    Err(e) => {
                        warn!(event = "backend.row_skipped", table, index, id = ?id, error = %e);
                        None
                    }
                }
            })
            .collect();

        Ok(decoded)
    }
}

fn with_filters(endpoint: &Url, filters: &[(&str, String)]) -> Url {
    let mut url = endpoint.clone();
    {
        let mut query = url.query_pairs_mut();
        query.append_pair("select", "*");
        for (column, value) in filters {
            query.append_pair(column, &format!("eq.{value}"));
        }
    }
    url
}
