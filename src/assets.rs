use std::path::Path;

use axum::{
    body::Body,
    extract::Request,
    http::{HeaderValue, StatusCode, header},
    response::Response,
};
use tower::ServiceExt;
use tower_http::services::{ServeDir, ServeFile, fs::ServeFileSystemResponseBody};

use crate::error::{AppError, AppResult};

/// Answers `req` with the single file at `path`, whatever the request path.
pub async fn serve_file(
    path: &Path,
    req: Request,
    content_type: &'static str,
    not_found: &'static str,
) -> AppResult<Response> {
    let Ok(resp) = ServeFile::new(path).oneshot(req).await;
    finish(resp, content_type, not_found)
}

/// Answers `req` with the file its path names under `root`. Paths that leave
/// `root` are treated as missing.
pub async fn serve_dir(
    root: &Path,
    req: Request,
    content_type: &'static str,
    not_found: &'static str,
) -> AppResult<Response> {
    let Ok(resp) = ServeDir::new(root).oneshot(req).await;
    finish(resp, content_type, not_found)
}

fn finish(
    resp: Response<ServeFileSystemResponseBody>,
    content_type: &'static str,
    not_found: &'static str,
) -> AppResult<Response> {
    if resp.status() == StatusCode::NOT_FOUND {
        return Err(AppError::NotFound(not_found));
    }

    let mut resp = resp.map(Body::new);
    if resp.status().is_success() {
        resp.headers_mut().insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    }
    Ok(resp)
}
