// app.rs
use crate::aggregator::PropertyAggregator;
use crate::backend::create_client;
use crate::config::AppConfig;
use crate::net::{
    ConnectivityProber, HttpTransport, ResilientFetcher, ReqwestTransport, Sleeper, SystemClock,
    ThreadSleeper, TransportError,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

/// Everything a request handler needs. Shared by all server workers.
pub struct AppState {
    pub aggregator: PropertyAggregator,
    pub prober: Arc<ConnectivityProber>,
    pub static_dir: PathBuf,
}

impl AppState {
    pub fn from_config(config: &AppConfig) -> Result<Self, TransportError> {
        let transport: Arc<dyn HttpTransport> = Arc::new(ReqwestTransport::new()?);
        Ok(Self::with_transport(config, transport, Arc::new(ThreadSleeper)))
    }

    pub fn with_transport(
        config: &AppConfig,
        transport: Arc<dyn HttpTransport>,
        sleeper: Arc<dyn Sleeper>,
    ) -> Self {
        let prober = Arc::new(ConnectivityProber::new(
            config.probe_url.clone(),
            transport.clone(),
            Arc::new(SystemClock),
        ));
        let fetcher = ResilientFetcher::new(transport, prober.clone(), sleeper);

        let client = create_client(&config.backend, fetcher);
        match &client {
            Ok(c) => info!(event = "backend.configured", rest_url = %c.rest_url()),
            Err(e) => warn!(event = "backend.unconfigured", error = %e),
        }

        Self {
            aggregator: PropertyAggregator::new(client),
            prober,
            static_dir: config.static_dir.clone(),
        }
    }
}
