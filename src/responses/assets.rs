use crate::errors::ServerError;
use crate::responses::ResultResp;
use astra::{Body, ResponseBuilder};
use mime::Mime;
use std::path::{Component, Path, PathBuf};

/// Serves `relative` from under `root`. Anything but plain path segments
/// (`..`, absolute paths, empty paths) is treated as not found.
pub fn static_file_response(root: &Path, relative: &str) -> ResultResp {
    let path = resolve(root, relative).ok_or(ServerError::NotFound)?;

    if !path.is_file() {
        return Err(ServerError::NotFound);
    }

    let bytes = std::fs::read(&path)
        .map_err(|e| ServerError::Internal(format!("{}: {e}", path.display())))?;

    ResponseBuilder::new()
        .status(200)
        .header("Content-Type", content_type(&path).as_ref())
        .header("Cache-Control", "public, max-age=3600")
        .body(Body::from(bytes))
        .map_err(|e| ServerError::Internal(e.to_string()))
}

fn resolve(root: &Path, relative: &str) -> Option<PathBuf> {
    let relative = Path::new(relative);

    let plain = relative
        .components()
        .all(|c| matches!(c, Component::Normal(_)));

    (plain && !relative.as_os_str().is_empty()).then(|| root.join(relative))
}

fn content_type(path: &Path) -> Mime {
    match path.extension().and_then(|e| e.to_str()) {
        Some("css") => mime::TEXT_CSS_UTF_8,
        Some("js") => mime::APPLICATION_JAVASCRIPT_UTF_8,
        Some("svg") => mime::IMAGE_SVG,
        Some("png") => mime::IMAGE_PNG,
        Some("jpg") | Some("jpeg") => mime::IMAGE_JPEG,
        _ => mime::APPLICATION_OCTET_STREAM,
    }
}
