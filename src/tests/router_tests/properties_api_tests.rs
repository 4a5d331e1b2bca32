// src/tests/router_tests/properties_api_tests.rs

use crate::domain::catalog::static_properties;
use crate::net::{HttpResponse, TransportError};
use crate::router::{handle, serve};
use crate::testing::{FakeTransport, PROBE_FRAGMENT};
use crate::tests::utils::{get, read_json, state_with_vars, test_state};
use serde_json::json;
use std::sync::Arc;

fn script_live_backend(transport: &FakeTransport) {
    transport.respond(PROBE_FRAGMENT, HttpResponse::new(200, ""));
    transport.respond_json(
        "rest/v1/properties",
        json!([
            { "id": 10, "title": "Cedar Duplex", "location": "Boise, ID", "price": 1800,
              "is_for_rent": true, "is_for_sale": false },
            { "id": 11, "title": "Empty Shell", "location": "Boise, ID", "price": 1 }
        ]),
    );
    transport.respond_json(
        "property_details?select=*&property_id=eq.10",
        json!([{ "property_id": 10, "bedrooms": 2, "facilities": ["Laundry"] }]),
    );
    transport.respond_json("property_details?select=*&property_id=eq.11", json!([]));
}

#[test]
fn get_properties_returns_live_records() {
    let transport = Arc::new(FakeTransport::new());
    script_live_backend(&transport);
    let state = test_state(&transport);

    let mut resp = handle(get("/api/get-properties"), &state).unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers()["Content-Type"].to_str().unwrap(),
        "application/json"
    );

    let body = read_json(&mut resp);
    assert_eq!(body["success"], true);
    assert!(body.get("source").is_none());
    assert!(body.get("error").is_none());

    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["id"], 10);
    assert_eq!(data[0]["isForRent"], true);
    assert_eq!(data[0]["details"]["bedrooms"], 2);
}

#[test]
fn get_properties_falls_back_to_static_when_offline() {
    let transport = Arc::new(FakeTransport::new());
    transport.fail(PROBE_FRAGMENT, TransportError::Connect("network down".into()));
    let state = test_state(&transport);

    let mut resp = handle(get("/api/get-properties"), &state).unwrap();
    assert_eq!(resp.status(), 200);

    let body = read_json(&mut resp);
    assert_eq!(body["success"], false);
    assert_eq!(body["source"], "static");
    assert_eq!(body["error"], "network is unavailable");
    assert_eq!(
        body["data"].as_array().unwrap().len(),
        static_properties().len()
    );
    assert_eq!(transport.calls_to("backend.test"), 0);
}

#[test]
fn get_properties_without_credentials_serves_static_data() {
    let transport = Arc::new(FakeTransport::new());
    let state = state_with_vars(&transport, &[]);

    let mut resp = handle(get("/api/get-properties"), &state).unwrap();
    let body = read_json(&mut resp);

    assert_eq!(body["source"], "static");
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("PROPERTY_BACKEND_URL is not set"));
    assert!(transport.calls().is_empty());
}

#[test]
fn fallback_mode_uses_whole_table_queries() {
    let transport = Arc::new(FakeTransport::new());
    transport.respond(PROBE_FRAGMENT, HttpResponse::new(200, ""));
    transport.respond_json(
        "rest/v1/properties",
        json!([{ "id": 1, "title": "Alder Court" }, { "id": 2, "title": "Birch Row" }]),
    );
    transport.respond_json(
        "property_details?select=*",
        json!([{ "property_id": 2, "bedrooms": 4 }]),
    );
    transport.respond_json("profiles?select=*", json!([]));
    let state = test_state(&transport);

    let mut resp = handle(get("/api/get-properties?mode=fallback"), &state).unwrap();
    let body = read_json(&mut resp);

    assert_eq!(body["success"], true);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["title"], "Birch Row");
    assert_eq!(transport.calls_to("property_id=eq."), 0);
}

#[test]
fn static_properties_endpoint_returns_catalog_object() {
    let transport = Arc::new(FakeTransport::new());
    let state = test_state(&transport);

    let mut resp = handle(get("/api/static-properties"), &state).unwrap();
    assert_eq!(resp.status(), 200);

    let body = read_json(&mut resp);
    let catalog = body.as_object().unwrap();
    assert_eq!(catalog.len(), static_properties().len());
    assert!(catalog["1"]["coordinates"]["lat"].is_number());
    assert!(catalog["1"]["images"].is_array());
    // Serving seed data never touches the network.
    assert!(transport.calls().is_empty());
}

#[test]
fn health_reports_cached_connectivity_without_probing() {
    let transport = Arc::new(FakeTransport::new());
    let state = test_state(&transport);

    let mut resp = handle(get("/api/health"), &state).unwrap();
    let body = read_json(&mut resp);

    assert_eq!(body, json!({ "status": "ok", "online": true }));
    assert!(transport.calls().is_empty());
}

#[test]
fn api_errors_are_json() {
    let transport = Arc::new(FakeTransport::new());
    let state = test_state(&transport);

    let mut resp = serve(get("/api/nope"), &state);
    assert_eq!(resp.status(), 404);
    assert_eq!(
        resp.headers()["Content-Type"].to_str().unwrap(),
        "application/json"
    );
    assert_eq!(
        read_json(&mut resp),
        json!({ "success": false, "error": "Not Found" })
    );

    let mut req = get("/api/get-properties");
    *req.method_mut() = "DELETE".parse().unwrap();
    let mut resp = serve(req, &state);
    assert_eq!(resp.status(), 400);
    assert_eq!(read_json(&mut resp)["success"], false);
}
