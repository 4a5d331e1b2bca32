use crate::errors::ServerError;
use crate::responses::ResultResp;
use astra::{Body, Response, ResponseBuilder};
use serde::Serialize;

#[derive(Serialize)]
struct ErrorBody<'a> {
    success: bool,
    error: &'a str,
}

pub fn json_response<T: Serialize>(status: u16, value: &T) -> ResultResp {
    let body = serde_json::to_vec(value).map_err(|e| ServerError::Internal(e.to_string()))?;

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", mime::APPLICATION_JSON.as_ref())
        .header("Cache-Control", "no-store")
        .body(Body::from(body))
        .map_err(|e| ServerError::Internal(e.to_string()))
}

/// `{ "success": false, "error": ... }` with the error's status. Must not fail.
pub fn json_error_response(err: ServerError) -> Response {
    let message = err.public_message();
    let body = ErrorBody {
        success: false,
        error: &message,
    };

    json_response(err.status(), &body)
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}
