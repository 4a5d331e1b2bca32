// net/fetch.rs
use crate::net::{
    ConnectivityProber, FetchError, HttpRequest, HttpResponse, HttpTransport, Method,
    TransportError,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

pub const MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(30_000);
const BACKOFF_BASE_MS: u64 = 1000;

/// Wait before the attempt following `attempt_number`: 2s after the first, 4s after the second.
pub fn backoff_delay(attempt_number: u32) -> Duration {
    Duration::from_millis(BACKOFF_BASE_MS * 2u64.pow(attempt_number))
}

pub trait Sleeper: Send + Sync {
    fn sleep(&self, duration: Duration);
}

pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    pub method: Method,
    /// Per-attempt timeout, not a budget for the whole retry loop.
    pub timeout: Duration,
    pub headers: Vec<(String, String)>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            method: Method::Get,
            timeout: DEFAULT_TIMEOUT,
            headers: Vec::new(),
        }
    }
}

impl FetchOptions {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// One iteration of the retry loop. Lives only for that iteration.
#[derive(Debug)]
pub struct FetchAttempt<'a> {
    pub url: &'a str,
    pub options: &'a FetchOptions,
    pub attempt_number: u32,
    pub timeout_ms: u64,
}

impl<'a> FetchAttempt<'a> {
    fn new(url: &'a str, options: &'a FetchOptions, attempt_number: u32) -> Self {
        Self {
            url,
            options,
            attempt_number,
            timeout_ms: options.timeout.as_millis() as u64,
        }
    }

    fn to_request(&self) -> HttpRequest {
        let request = HttpRequest::new(self.options.method, self.url)
            .header("Cache-Control", "no-cache")
            .header("Pragma", "no-cache");

        self.options
            .headers
            .iter()
            .fold(request, |r, (name, value)| r.header(name.as_str(), value.as_str()))
    }
}

/// Wraps the transport with an offline short-circuit and bounded retry.
///
/// Only transport failures are retried. A response with any HTTP status,
/// 5xx included, is handed back to the caller on the first attempt.
#[derive(Clone)]
pub struct ResilientFetcher {
    transport: Arc<dyn HttpTransport>,
    prober: Arc<ConnectivityProber>,
    sleeper: Arc<dyn Sleeper>,
}

impl ResilientFetcher {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        prober: Arc<ConnectivityProber>,
        sleeper: Arc<dyn Sleeper>,
    ) -> Self {
        Self {
            transport,
            prober,
            sleeper,
        }
    }

    pub fn prober(&self) -> &Arc<ConnectivityProber> {
        &self.prober
    }

    pub fn fetch_with_retry(
        &self,
        url: &str,
        options: &FetchOptions,
    ) -> Result<HttpResponse, FetchError> {
        if !self.prober.check_connection() {
            warn!(event = "fetch.offline", url = %url);
            return Err(FetchError::Offline);
        }

        let mut last_err: Option<TransportError> = None;

        for attempt_number in 1..=MAX_ATTEMPTS {
            let attempt = FetchAttempt::new(url, options, attempt_number);
            let request = attempt.to_request();
            let start = Instant::now();

            debug!(
                event = "fetch.attempt",
                url = %attempt.url,
                attempt = attempt.attempt_number,
                timeout_ms = attempt.timeout_ms,
            );

            match self.transport.send(&request, options.timeout) {
                Ok(resp) => {
                    info!(
                        event = "fetch.succeeded",
                        url = %attempt.url,
                        attempt = attempt.attempt_number,
                        status = resp.status,
                        elapsed_ms = start.elapsed().as_millis() as u64,
                    );
                    return Ok(resp);
                }
                Err(e) => {
                    let backoff = (attempt_number < MAX_ATTEMPTS).then(|| backoff_delay(attempt_number));

                    warn!(
                        event = "fetch.attempt_failed",
                        url = %attempt.url,
                        attempt = attempt.attempt_number,
                        error = %e,
                        backoff_ms = backoff.map(|d| d.as_millis() as u64).unwrap_or(0),
                    );

                    last_err = Some(e);

                    if let Some(delay) = backoff {
                        self.sleeper.sleep(delay);
                    }
                }
            }
        }

        Err(FetchError::Network {
            attempts: MAX_ATTEMPTS,
            last: last_err
                .unwrap_or_else(|| TransportError::Other("retry loop exhausted".into())),
        })
    }
}
