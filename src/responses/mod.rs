pub mod assets;
pub mod html;
pub mod json;

use crate::errors::ServerError;
use astra::Response;

pub type ResultResp = Result<Response, ServerError>;

pub use assets::static_file_response;
pub use html::{html_error_response, html_response};
pub use json::{json_error_response, json_response};
