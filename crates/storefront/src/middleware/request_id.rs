//! Request correlation IDs.
//!
//! Reuses the upstream proxy's `x-request-id` when one arrives, otherwise
//! mints a UUID v4. The ID is tagged onto the Sentry scope and echoed in
//! the response so a buyer-reported failure can be matched to its logs.

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use uuid::Uuid;

/// Correlation ID header, shared with upstream proxies.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Middleware that ensures every request carries a correlation ID.
pub async fn request_id(request: Request, next: Next) -> Response {
    let id = incoming_id(&request).unwrap_or_else(|| Uuid::new_v4().to_string());

    sentry::configure_scope(|scope| {
        scope.set_tag("request_id", &id);
    });

    let mut response = next.run(request).await;
    if let Ok(value) = HeaderValue::from_str(&id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

/// A usable correlation ID supplied by the caller, if any.
fn incoming_id(request: &Request) -> Option<String> {
    let id = request.headers().get(REQUEST_ID_HEADER)?.to_str().ok()?;
    if id.is_empty() {
        return None;
    }
    Some(id.to_string())
}
