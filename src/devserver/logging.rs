// src/devserver/logging.rs
//! Request and response body logging for the dev server, at debug level.

use axum::body::to_bytes;
use axum::{
    body::{Body, Bytes},
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use tracing::debug;

/// Largest body the middleware buffers; the service only exchanges small JSON.
const MAX_LOGGED_BODY: usize = 1024 * 1024;

fn render(bytes: &Bytes) -> Option<String> {
    if bytes.is_empty() {
        return None;
    }
    let text = std::str::from_utf8(bytes).ok()?;
    match serde_json::from_str::<serde_json::Value>(text) {
        Ok(json) => Some(json.to_string()),
        Err(_) => Some(text.to_string()),
    }
}

pub async fn log_request_response(request: Request, next: Next) -> Result<Response, StatusCode> {
    let (parts, body) = request.into_parts();
    let bytes = to_bytes(body, MAX_LOGGED_BODY)
        .await
        .map_err(|_| StatusCode::PAYLOAD_TOO_LARGE)?;

    match render(&bytes) {
        Some(request_body) => debug!(
            method = %parts.method,
            uri = %parts.uri,
            request_body = %request_body,
            "Request"
        ),
        None => debug!(method = %parts.method, uri = %parts.uri, "Request"),
    }

    let response = next.run(Request::from_parts(parts, Body::from(bytes))).await;

    let (parts, body) = response.into_parts();
    let bytes = to_bytes(body, usize::MAX)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    if let Some(response_body) = render(&bytes) {
        debug!(status = %parts.status, response_body = %response_body, "Response");
    }

    Ok(Response::from_parts(parts, Body::from(bytes)))
}
