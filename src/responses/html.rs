use crate::errors::ServerError;
use crate::responses::ResultResp;
use crate::templates::components::error_page;
use astra::{Body, Response, ResponseBuilder};
use maud::Markup;

pub fn html_response(markup: Markup) -> ResultResp {
    html_with_status(200, markup)
}

/// Render a ServerError as an HTML page. Used at the top of the server loop,
/// so it must not fail.
pub fn html_error_response(err: ServerError) -> Response {
    let status = err.status();

    html_with_status(status, error_page(status, &err.public_message()))
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}

fn html_with_status(status: u16, markup: Markup) -> ResultResp {
    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", mime::TEXT_HTML_UTF_8.as_ref())
        .body(Body::from(markup.into_string()))
        .map_err(|e| ServerError::Internal(e.to_string()))
}
