//! Process-wide 404 rewriting for empty read results
//!
//! Controllers signal absence by serializing an empty body (JSON `null`, or an
//! empty array for routes that return bare sequences). This middleware runs
//! once for the whole router: it inspects every successful GET response before
//! it leaves the process and overrides the status to 404 when the body is
//! empty, while still emitting the body unchanged.

use axum::body::{Body, to_bytes};
use axum::extract::Request;
use axum::http::{Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::{debug, error};

/// Middleware that rewrites `200 OK` GET responses with an empty payload into
/// `404 Not Found`, preserving the body.
///
/// Install it once on the outer router (the [`ServerBuilder`] does this);
/// responses to non-GET requests and non-200 responses pass through
/// untouched. Intended for buffered JSON responses; it reads the full body
/// into memory.
///
/// [`ServerBuilder`]: crate::server::builder::ServerBuilder
pub async fn not_found_on_empty(request: Request, next: Next) -> Response {
    let is_read = request.method() == Method::GET;
    let response = next.run(request).await;

    if !is_read || response.status() != StatusCode::OK {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(error) => {
            error!(%error, "failed to buffer response body for empty-result check");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    if is_empty_payload(&bytes) {
        debug!("empty read result, overriding status to 404");
        parts.status = StatusCode::NOT_FOUND;
    }

    Response::from_parts(parts, Body::from(bytes))
}

/// A payload counts as empty when there is no body at all, the body is JSON
/// `null`, or the body is an empty JSON sequence.
fn is_empty_payload(bytes: &[u8]) -> bool {
    matches!(bytes.trim_ascii(), b"" | b"null" | b"[]")
}
