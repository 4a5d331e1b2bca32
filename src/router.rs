use crate::aggregator::{DataSource, FetchMode};
use crate::app::AppState;
use crate::domain::catalog::static_property_catalog;
use crate::domain::{ListingQuery, PropertyRecord};
use crate::errors::ServerError;
use crate::responses::{
    html_error_response, html_response, json_error_response, json_response,
    static_file_response, ResultResp,
};
use crate::templates::pages::{listings_page, ListingsVm};
use astra::{Request, Response};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Serialize)]
struct PropertiesBody<'a> {
    data: &'a [PropertyRecord],
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<DataSource>,
}

#[derive(Serialize)]
struct HealthBody {
    status: &'static str,
    online: bool,
}

/// Entry point for the server loop. Errors on `/api/` paths are JSON, the
/// rest render as an HTML error page.
pub fn serve(req: Request, state: &AppState) -> Response {
    let is_api = req.uri().path().starts_with("/api/");

    match handle(req, state) {
        Ok(resp) => resp,
        Err(err) if is_api => json_error_response(err),
        Err(err) => html_error_response(err),
    }
}

pub fn handle(req: Request, state: &AppState) -> ResultResp {
    let method = req.method().as_str();
    let path = req.uri().path();

    match (method, path) {
        ("GET", "/") | ("GET", "/properties") => listings(&req, state),
        ("GET", "/api/get-properties") => get_properties(&req, state),
        ("GET", "/api/static-properties") => json_response(200, &static_property_catalog()),
        ("GET", "/api/health") => json_response(
            200,
            &HealthBody {
                status: "ok",
                online: state.prober.state().is_online,
            },
        ),
        ("GET", p) if p.starts_with("/static/") => {
            static_file_response(&state.static_dir, &p["/static/".len()..])
        }
        (_, "/") | (_, "/properties") | (_, "/api/get-properties")
        | (_, "/api/static-properties") | (_, "/api/health") => {
            Err(ServerError::BadRequest(format!("{method} is not supported on {path}")))
        }
        _ => Err(ServerError::NotFound),
    }
}

fn get_properties(req: &Request, state: &AppState) -> ResultResp {
    let params = parse_query(req);
    let mode = FetchMode::from_param(params.get("mode").map(String::as_str));

    let result = state.aggregator.fetch_all_properties(mode);
    let is_static = result.is_static();

    let body = PropertiesBody {
        data: &result.records,
        success: !is_static,
        error: result.fallback_reason.as_deref(),
        source: is_static.then_some(DataSource::Static),
    };

    json_response(200, &body)
}

fn listings(req: &Request, state: &AppState) -> ResultResp {
    let params = parse_query(req);
    let query = ListingQuery::from_params(&params);
    let mode = FetchMode::from_param(params.get("mode").map(String::as_str));

    let result = state.aggregator.fetch_all_properties(mode);

    let vm = ListingsVm {
        query: &query,
        page: query.apply(&result.records),
        is_static: result.is_static(),
        fallback_reason: result.fallback_reason.as_deref(),
    };

    html_response(listings_page(&vm))
}

fn parse_query(req: &Request) -> HashMap<String, String> {
    req.uri()
        .query()
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}
