use crate::app::AppState;
use crate::config::AppConfig;
use crate::router::serve;
use astra::Server;
use tracing::{error, info};

mod aggregator;
mod app;
mod backend;
mod config;
mod domain;
mod errors;
mod net;
mod responses;
mod router;
mod telemetry;
mod templates;

#[cfg(test)]
mod testing;
#[cfg(test)]
mod tests;

fn main() {
    // 1️⃣ Environment and logging
    dotenvy::dotenv().ok();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            telemetry::init_tracing(false);
            error!(event = "startup.config_invalid", error = %e);
            std::process::exit(1);
        }
    };

    telemetry::init_tracing(config.json_logs);

    // 2️⃣ Build the data layer (prober -> fetcher -> backend client -> aggregator)
    let state = match AppState::from_config(&config) {
        Ok(state) => state,
        Err(e) => {
            error!(event = "startup.transport_failed", error = %e);
            std::process::exit(1);
        }
    };

    // 3️⃣ Start the server
    let addr = config.bind_addr;
    info!(event = "server.starting", addr = %addr);

    let server = Server::bind(&addr).max_workers(8);

    // 4️⃣ Serve requests, passing shared state into closure
    let result = server.serve(move |req, _info| serve(req, &state));

    if let Err(e) = result {
        error!(event = "server.stopped", error = %e);
        std::process::exit(1);
    }

    info!(event = "server.shutdown");
}
