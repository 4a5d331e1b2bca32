// src/tests/router_tests/listings_page_tests.rs

use crate::errors::ServerError;
use crate::net::{HttpResponse, TransportError};
use crate::router::{handle, serve};
use crate::testing::{FakeTransport, PROBE_FRAGMENT};
use crate::tests::utils::{get, read_body, test_state};
use serde_json::json;
use std::sync::Arc;

fn script_two_homes(transport: &FakeTransport) {
    transport.respond(PROBE_FRAGMENT, HttpResponse::new(200, ""));
    transport.respond_json(
        "rest/v1/properties",
        json!([
            { "id": 1, "title": "Harbor View Condo", "location": "Portland, ME", "price": 615000,
              "is_for_sale": true },
            { "id": 2, "title": "Garden Studio", "location": "Portland, OR", "price": 1450,
              "is_for_rent": true }
        ]),
    );
    transport.respond_json(
        "property_details?select=*&property_id=eq.1",
        json!([{ "property_id": 1, "bedrooms": 2 }]),
    );
    transport.respond_json(
        "property_details?select=*&property_id=eq.2",
        json!([{ "property_id": 2, "bedrooms": 0 }]),
    );
}

#[test]
fn listing_page_renders_live_homes_without_banner() {
    let transport = Arc::new(FakeTransport::new());
    script_two_homes(&transport);
    let state = test_state(&transport);

    let mut resp = handle(get("/"), &state).unwrap();
    assert_eq!(resp.status(), 200);

    let body = read_body(&mut resp);
    assert!(body.contains("Harbor View Condo"));
    assert!(body.contains("Garden Studio"));
    assert!(body.contains("$615,000"));
    assert!(!body.contains("Showing sample listings."));
}

#[test]
fn listing_page_applies_filters_from_query() {
    let transport = Arc::new(FakeTransport::new());
    script_two_homes(&transport);
    let state = test_state(&transport);

    let mut resp = handle(get("/properties?purpose=rent&q=portland%2C+or"), &state).unwrap();
    let body = read_body(&mut resp);

    assert!(body.contains("Garden Studio"));
    assert!(!body.contains("Harbor View Condo"));
    assert!(body.contains("1 home found"));
}

#[test]
fn listing_page_shows_banner_over_sample_data() {
    let transport = Arc::new(FakeTransport::new());
    transport.fail(PROBE_FRAGMENT, TransportError::Timeout(std::time::Duration::from_secs(5)));
    let state = test_state(&transport);

    let mut resp = handle(get("/"), &state).unwrap();
    assert_eq!(resp.status(), 200);

    let body = read_body(&mut resp);
    assert!(body.contains("Showing sample listings."));
    assert!(body.contains("Modern Family Home"));
}

#[test]
fn unknown_route_is_not_found() {
    let transport = Arc::new(FakeTransport::new());
    let state = test_state(&transport);

    let err = handle(get("/nope"), &state).err().unwrap();
    assert!(matches!(err, ServerError::NotFound));
}

#[test]
fn wrong_method_is_bad_request() {
    let transport = Arc::new(FakeTransport::new());
    let state = test_state(&transport);

    let mut req = get("/api/get-properties");
    *req.method_mut() = "POST".parse().unwrap();

    let err = handle(req, &state).err().unwrap();
    assert_eq!(err.status(), 400);
}

#[test]
fn error_page_hides_internal_details() {
    let mut resp = crate::responses::html_error_response(ServerError::Internal(
        "secret stack".into(),
    ));

    assert_eq!(resp.status(), 500);
    let body = read_body(&mut resp);
    assert!(body.contains("Error 500"));
    assert!(!body.contains("secret stack"));
}

#[test]
fn page_errors_render_html() {
    let transport = Arc::new(FakeTransport::new());
    let state = test_state(&transport);

    let mut resp = serve(get("/nope"), &state);

    assert_eq!(resp.status(), 404);
    assert_eq!(
        resp.headers()["Content-Type"].to_str().unwrap(),
        "text/html; charset=utf-8"
    );
    assert!(read_body(&mut resp).contains("Error 404"));
}
