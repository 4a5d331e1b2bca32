// testing.rs
//! Network and time fakes shared by the unit and router tests.

use crate::backend::{create_client, BackendClient, BackendConfig};
use crate::net::{
    Clock, ConnectivityProber, HttpRequest, HttpResponse, HttpTransport, ResilientFetcher,
    Sleeper, TransportError,
};
use chrono::{DateTime, Duration as ChronoDuration, TimeZone, Utc};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const PROBE_URL: &str = "https://probe.test/favicon.ico";
pub const PROBE_FRAGMENT: &str = "probe.test";
pub const BACKEND_URL: &str = "https://backend.test";

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub request: HttpRequest,
    pub timeout: Duration,
}

struct Route {
    fragment: String,
    outcomes: VecDeque<Result<HttpResponse, TransportError>>,
}

/// Scripted transport. Each URL fragment owns a queue of outcomes; the
/// last outcome in a queue repeats forever. The longest matching fragment wins.
pub struct FakeTransport {
    routes: Mutex<Vec<Route>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self {
            routes: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn respond(&self, fragment: &str, resp: HttpResponse) {
        self.push(fragment, Ok(resp));
    }

    pub fn respond_json(&self, fragment: &str, body: serde_json::Value) {
        self.push(fragment, Ok(HttpResponse::new(200, body.to_string())));
    }

    pub fn fail(&self, fragment: &str, err: TransportError) {
        self.push(fragment, Err(err));
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, fragment: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.request.url.contains(fragment))
            .count()
    }

    fn push(&self, fragment: &str, outcome: Result<HttpResponse, TransportError>) {
        let mut routes = self.routes.lock().unwrap();
        match routes.iter_mut().find(|r| r.fragment == fragment) {
            Some(route) => route.outcomes.push_back(outcome),
            None => routes.push(Route {
                fragment: fragment.to_string(),
                outcomes: VecDeque::from([outcome]),
            }),
        }
    }
}

impl HttpTransport for FakeTransport {
    fn send(&self, request: &HttpRequest, timeout: Duration) -> Result<HttpResponse, TransportError> {
        self.calls.lock().unwrap().push(RecordedCall {
            request: request.clone(),
            timeout,
        });

        let mut routes = self.routes.lock().unwrap();
        let route = routes
            .iter_mut()
            .filter(|r| request.url.contains(&r.fragment))
            .max_by_key(|r| r.fragment.len());

        match route {
            Some(route) if route.outcomes.len() > 1 => route.outcomes.pop_front().unwrap(),
            Some(route) => route.outcomes.front().cloned().unwrap(),
            None => Err(TransportError::Connect(format!("no route for {}", request.url))),
        }
    }
}

pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()),
        }
    }

    pub fn advance_secs(&self, secs: i64) {
        *self.now.lock().unwrap() += ChronoDuration::seconds(secs);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

/// Records requested waits instead of sleeping.
pub struct RecordingSleeper {
    sleeps: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn new() -> Self {
        Self {
            sleeps: Mutex::new(Vec::new()),
        }
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

impl Sleeper for RecordingSleeper {
    fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
    }
}

pub fn fetcher_with(transport: Arc<FakeTransport>) -> (ResilientFetcher, Arc<RecordingSleeper>) {
    let clock = Arc::new(ManualClock::new());
    let prober = Arc::new(ConnectivityProber::new(PROBE_URL, transport.clone(), clock));
    let sleeper = Arc::new(RecordingSleeper::new());
    let fetcher = ResilientFetcher::new(transport, prober, sleeper.clone());
    (fetcher, sleeper)
}

pub fn backend_config() -> BackendConfig {
    BackendConfig {
        url: Some(BACKEND_URL.to_string()),
        anon_key: Some("anon-key".to_string()),
        ..BackendConfig::default()
    }
}

/// A client wired to `transport` with a reachable probe already scripted.
pub fn client_with(transport: Arc<FakeTransport>) -> (BackendClient, Arc<RecordingSleeper>) {
    transport.respond(PROBE_FRAGMENT, HttpResponse::new(200, ""));
    let (fetcher, sleeper) = fetcher_with(transport);
    let client = create_client(&backend_config(), fetcher).unwrap();
    (client, sleeper)
}
