use crate::app::AppState;
use crate::backend::client::{BACKEND_ANON_KEY_VAR, BACKEND_URL_VAR};
use crate::config::{AppConfig, PROBE_URL_VAR, STATIC_DIR_VAR};
use crate::testing::{FakeTransport, RecordingSleeper, BACKEND_URL, PROBE_URL};
use astra::{Body, Request, Response};
use std::collections::HashMap;
use std::io::Read;
use std::sync::Arc;

/// The repository's own asset directory.
pub const STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

/// App state wired to a scripted transport, with backend credentials set.
pub fn test_state(transport: &Arc<FakeTransport>) -> AppState {
    state_with_vars(
        transport,
        &[
            (BACKEND_URL_VAR, BACKEND_URL),
            (BACKEND_ANON_KEY_VAR, "anon-key"),
            (PROBE_URL_VAR, PROBE_URL),
            (STATIC_DIR_VAR, STATIC_DIR),
        ],
    )
}

pub fn state_with_vars(transport: &Arc<FakeTransport>, pairs: &[(&str, &str)]) -> AppState {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let config = AppConfig::from_lookup(|key| vars.get(key).cloned())
        .unwrap_or_else(|e| panic!("test config invalid: {e}"));

    AppState::with_transport(&config, transport.clone(), Arc::new(RecordingSleeper::new()))
}

pub fn get(uri: &str) -> Request {
    let mut req = Request::new(Body::empty());
    *req.uri_mut() = uri.parse().unwrap();
    req
}

pub fn read_body(resp: &mut Response) -> String {
    let mut body_bytes = Vec::new();
    resp.body_mut()
        .reader()
        .read_to_end(&mut body_bytes)
        .unwrap();
    String::from_utf8(body_bytes).unwrap()
}

pub fn read_json(resp: &mut Response) -> serde_json::Value {
    serde_json::from_str(&read_body(resp)).unwrap()
}
