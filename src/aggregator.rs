// aggregator.rs
use crate::backend::{
    AgentRow, BackendClient, BackendError, ConfigurationError, PropertyDetailRow, PropertyRow,
};
use crate::domain::catalog::static_properties;
use crate::domain::PropertyRecord;
use crate::net::FetchError;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use thiserror::Error;
use tracing::{info, warn};

/// Which live path to take. Chosen by the caller, never switched automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchMode {
    /// Base rows first, then details and agent per row.
    #[default]
    Primary,
    /// Each table fetched whole and joined here by foreign key.
    Fallback,
}

impl FetchMode {
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("fallback") => FetchMode::Fallback,
            _ => FetchMode::Primary,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            FetchMode::Primary => "primary",
            FetchMode::Fallback => "fallback",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Live,
    Static,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AggregationResult {
    pub records: Vec<PropertyRecord>,
    pub source: DataSource,
    /// Why live data was abandoned. Only set when `source` is `Static`.
    pub fallback_reason: Option<String>,
}

impl AggregationResult {
    fn live(records: Vec<PropertyRecord>) -> Self {
        Self {
            records,
            source: DataSource::Live,
            fallback_reason: None,
        }
    }

    fn fallback(reason: String) -> Self {
        Self {
            records: static_properties(),
            source: DataSource::Static,
            fallback_reason: Some(reason),
        }
    }

    pub fn is_static(&self) -> bool {
        self.source == DataSource::Static
    }
}

/// Every way live retrieval can end. All of them degrade to static data.
#[derive(Debug, Error)]
enum AggregateError {
    #[error("backend is not configured: {0}")]
    Configuration(ConfigurationError),
    #[error("network is unavailable")]
    Offline,
    #[error("backend unreachable: {0}")]
    Network(FetchError),
    #[error("backend query failed: {0}")]
    Backend(BackendError),
    #[error("backend returned no usable property records")]
    EmptyResult,
}

impl From<BackendError> for AggregateError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Fetch(FetchError::Offline) => AggregateError::Offline,
            BackendError::Fetch(e) => AggregateError::Network(e),
            other => AggregateError::Backend(other),
        }
    }
}

/// Why one base row did not make it into the result.
#[derive(Debug, Error)]
enum SkipReason {
    #[error("detail lookup failed: {0}")]
    DetailsUnavailable(BackendError),
    #[error("no detail records")]
    NoDetails,
}

pub struct PropertyAggregator {
    backend: Result<BackendClient, ConfigurationError>,
}

impl PropertyAggregator {
    /// Takes the outcome of `create_client` as-is, so a missing configuration
    /// shows up as static data rather than a crash.
    pub fn new(backend: Result<BackendClient, ConfigurationError>) -> Self {
        Self { backend }
    }

    /// Never fails. Falls back to the static sample set when live data is
    /// unavailable for any reason.
    pub fn fetch_all_properties(&self, mode: FetchMode) -> AggregationResult {
        match self.try_fetch(mode) {
            Ok(records) => {
                info!(event = "aggregate.completed", records = records.len(), mode = mode.as_str());
                AggregationResult::live(records)
            }
            Err(e) => {
                warn!(event = "aggregate.fallback", reason = %e, mode = mode.as_str());
                AggregationResult::fallback(e.to_string())
            }
        }
    }

    fn try_fetch(&self, mode: FetchMode) -> Result<Vec<PropertyRecord>, AggregateError> {
        let client = self
            .backend
            .as_ref()
            .map_err(|e| AggregateError::Configuration(e.clone()))?;

        let records = match mode {
            FetchMode::Primary => collect_primary(client)?,
            FetchMode::Fallback => collect_joined(client)?,
        };

        let records = dedupe_by_id(records);

        if records.is_empty() {
            return Err(AggregateError::EmptyResult);
        }

        Ok(records)
    }
}

fn collect_primary(client: &BackendClient) -> Result<Vec<PropertyRecord>, AggregateError> {
    let bases = client.fetch_properties()?;

    // Lazy and strictly sequential: one row's lookups finish before the next starts.
    let records = bases
        .into_iter()
        .map(|base| {
            let id = base.id;
            (id, enrich(client, base))
        })
        .filter_map(|(id, outcome)| match outcome {
            Ok(record) => Some(record),
            Err(reason) => {
                warn!(event = "aggregate.record_skipped", property_id = id, reason = %reason);
                None
            }
        })
        .collect();

    Ok(records)
}

fn enrich(client: &BackendClient, base: PropertyRow) -> Result<PropertyRecord, SkipReason> {
    let details = client
        .fetch_details_for(base.id)
        .map_err(SkipReason::DetailsUnavailable)?;

    if details.is_empty() {
        return Err(SkipReason::NoDetails);
    }

    let agent = match base.agent_id.as_deref() {
        Some(agent_id) => lookup_agent(client, base.id, agent_id),
        None => None,
    };

    PropertyRecord::assemble(base, &details, agent).ok_or(SkipReason::NoDetails)
}

/// The agent is optional; a failed lookup keeps the listing without one.
fn lookup_agent(client: &BackendClient, property_id: i64, agent_id: &str) -> Option<AgentRow> {
    match client.fetch_agent(agent_id) {
        Ok(agent) => agent,
        Err(e) => {
            warn!(event = "aggregate.agent_unavailable", property_id, agent_id, error = %e);
            None
        }
    }
}

fn collect_joined(client: &BackendClient) -> Result<Vec<PropertyRecord>, AggregateError> {
    let bases = client.fetch_properties()?;
    let details = client.fetch_all_details()?;

    let agents: HashMap<String, AgentRow> = match client.fetch_agents() {
        Ok(rows) => rows.into_iter().map(|a| (a.id.clone(), a)).collect(),
        Err(e) => {
            warn!(event = "aggregate.agent_unavailable", error = %e);
            HashMap::new()
        }
    };

    let mut details_by_property: HashMap<i64, Vec<PropertyDetailRow>> = HashMap::new();
    for row in details {
        details_by_property.entry(row.property_id).or_default().push(row);
    }

    let records = bases
        .into_iter()
        .filter_map(|base| {
            let id = base.id;
            let rows = details_by_property.get(&id).map(Vec::as_slice).unwrap_or(&[]);
            let agent = base.agent_id.as_ref().and_then(|a| agents.get(a)).cloned();

            let record = PropertyRecord::assemble(base, rows, agent);
            if record.is_none() {
                warn!(event = "aggregate.record_skipped", property_id = id, reason = %SkipReason::NoDetails);
            }
            record
        })
        .collect();

    Ok(records)
}

/// Keeps the first record for each id, preserving order.
fn dedupe_by_id(records: Vec<PropertyRecord>) -> Vec<PropertyRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|r| {
            let fresh = seen.insert(r.id);
            if !fresh {
                warn!(event = "aggregate.duplicate_id", property_id = r.id);
            }
            fresh
        })
        .collect()
}
