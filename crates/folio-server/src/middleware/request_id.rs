//! Request ID middleware.
//!
//! Every request runs inside a `request` span carrying an id, the method and
//! the path, so log lines emitted while handling it (including server-error
//! logs from [`crate::error::AppError`]) can be correlated. The id is echoed
//! back in the `x-request-id` response header.

use axum::http::{HeaderMap, HeaderName, HeaderValue, Request};
use axum::middleware::Next;
use axum::response::Response;
use tracing::Instrument;
use uuid::Uuid;

/// Header name used for the request identifier.
pub static X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Longest client-supplied id that is reused as-is.
const MAX_ID_LEN: usize = 128;

/// Tag the request with an id and echo it on the response.
pub async fn request_id_middleware(request: Request<axum::body::Body>, next: Next) -> Response {
    let id = client_request_id(request.headers()).unwrap_or_else(|| Uuid::new_v4().to_string());

    let span = tracing::info_span!(
        "request",
        request_id = %id,
        method = %request.method(),
        path = %request.uri().path(),
    );
    let mut response = next.run(request).instrument(span).await;

    if let Ok(val) = HeaderValue::from_str(&id) {
        response.headers_mut().insert(X_REQUEST_ID.clone(), val);
    }

    response
}

/// A usable id sent by the client, if any.
fn client_request_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get(&X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty() && id.len() <= MAX_ID_LEN)
        .map(String::from)
}
