// src/tests/router_tests/static_files_tests.rs

use crate::domain::catalog::static_properties;
use crate::errors::ServerError;
use crate::router::handle;
use crate::testing::FakeTransport;
use crate::tests::utils::{get, read_body, test_state};
use std::sync::Arc;

#[test]
fn stylesheet_is_served_as_css() {
    let transport = Arc::new(FakeTransport::new());
    let state = test_state(&transport);

    let mut resp = handle(get("/static/main.css"), &state).unwrap();

    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers()["Content-Type"].to_str().unwrap(),
        "text/css; charset=utf-8"
    );
    assert!(read_body(&mut resp).contains(".banner"));
}

#[test]
fn every_sample_image_resolves() {
    let transport = Arc::new(FakeTransport::new());
    let state = test_state(&transport);

    for record in static_properties() {
        let resp = handle(get(&record.image), &state)
            .unwrap_or_else(|e| panic!("{} not served: {e}", record.image));

        assert_eq!(resp.status(), 200);
        assert_eq!(
            resp.headers()["Content-Type"].to_str().unwrap(),
            "image/svg+xml"
        );
    }
}

#[test]
fn favicon_from_layout_resolves() {
    let transport = Arc::new(FakeTransport::new());
    let state = test_state(&transport);

    let resp = handle(get("/static/favicon.svg"), &state).unwrap();
    assert_eq!(resp.status(), 200);
}

#[test]
fn paths_outside_the_static_dir_are_not_found() {
    let transport = Arc::new(FakeTransport::new());
    let state = test_state(&transport);

    for uri in ["/static/../Cargo.toml", "/static/", "/static/samples", "/static/missing.css"] {
        let err = handle(get(uri), &state).err().unwrap();
        assert!(matches!(err, ServerError::NotFound), "{uri}");
    }
}
