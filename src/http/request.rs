//! Request handling helpers.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) for requests that lack one
//! - Log the inbound header set of every request before it is handled
//! - Buffer request bodies for handlers that need them whole
//!
//! # Design Decisions
//! - Request ID added by the outermost layer so every log line can carry it
//! - A client-supplied `x-request-id` is kept as-is
//! - Bodies are read without a size cap; echo must return any byte sequence

use axum::body::{Body, Bytes};
use axum::http::{HeaderValue, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

/// Header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Generates request IDs from random UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let value = HeaderValue::from_str(&Uuid::new_v4().to_string()).ok()?;
        Some(RequestId::new(value))
    }
}

/// Access to the request ID of a request.
pub trait RequestIdExt {
    /// The `x-request-id` header value, or `"unknown"` when absent.
    fn request_id(&self) -> &str;
}

impl<B> RequestIdExt for Request<B> {
    fn request_id(&self) -> &str {
        self.headers()
            .get(X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown")
    }
}

/// Log an inbound request and its headers before a handler processes it.
pub fn log_inbound<B>(kind: &'static str, request: &Request<B>) {
    tracing::info!(
        request_id = %request.request_id(),
        kind,
        method = %request.method(),
        path = %request.uri().path(),
        headers = ?request.headers(),
        "Got request"
    );
}

/// Read a whole request body into memory.
pub async fn read_body(body: Body) -> Result<Bytes, axum::Error> {
    axum::body::to_bytes(body, usize::MAX).await
}
