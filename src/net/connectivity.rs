// net/connectivity.rs
use crate::net::{HttpRequest, HttpTransport};
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Minimum spacing between two real probes. Calls in between reuse the cached answer.
pub const PROBE_INTERVAL: Duration = Duration::from_secs(10);
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_PROBE_URL: &str = "https://www.google.com/favicon.ico";

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectivityState {
    pub is_online: bool,
    /// `None` until the first probe has run.
    pub last_checked_at: Option<DateTime<Utc>>,
}

impl Default for ConnectivityState {
    fn default() -> Self {
        Self {
            is_online: true,
            last_checked_at: None,
        }
    }
}

impl ConnectivityState {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        match self.last_checked_at {
            // A clock that stepped backwards makes the cached answer stale.
            Some(last) => (now - last)
                .to_std()
                .map(|elapsed| elapsed < PROBE_INTERVAL)
                .unwrap_or(false),
            None => false,
        }
    }
}

/// Rate-limited reachability check against a third-party endpoint.
///
/// The prober owns the only copy of `ConnectivityState`; callers get it
/// injected (usually as `Arc<ConnectivityProber>`) instead of reading a global.
pub struct ConnectivityProber {
    probe_url: String,
    transport: Arc<dyn HttpTransport>,
    clock: Arc<dyn Clock>,
    state: Mutex<ConnectivityState>,
}

impl ConnectivityProber {
    pub fn new(
        probe_url: impl Into<String>,
        transport: Arc<dyn HttpTransport>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            probe_url: probe_url.into(),
            transport,
            clock,
            state: Mutex::new(ConnectivityState::default()),
        }
    }

    /// Snapshot of the cached state. Never triggers a probe.
    pub fn state(&self) -> ConnectivityState {
        *self.lock_state()
    }

    /// Returns whether outbound network access is available.
    ///
    /// Probes at most once per `PROBE_INTERVAL`. Never fails: a timeout or
    /// transport error simply means offline. Any HTTP status means online.
    pub fn check_connection(&self) -> bool {
        let now = self.clock.now();

        // Held across the probe so concurrent workers share one probe.
        let mut state = self.lock_state();

        if state.is_fresh(now) {
            debug!(event = "connectivity.cached", online = state.is_online);
            return state.is_online;
        }

        let request = HttpRequest::head(&self.probe_url).header("Cache-Control", "no-cache");

        let online = match self.transport.send(&request, PROBE_TIMEOUT) {
            Ok(_) => true,
            Err(e) => {
                warn!(event = "connectivity.probe_failed", url = %self.probe_url, error = %e);
                false
            }
        };

        info!(event = "connectivity.probe", url = %self.probe_url, online, cached = false);

        state.is_online = online;
        state.last_checked_at = Some(now);
        online
    }

    fn lock_state(&self) -> MutexGuard<'_, ConnectivityState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
