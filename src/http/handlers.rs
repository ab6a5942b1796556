//! Diagnostic endpoint handlers.
//!
//! # Endpoints
//! - `/echo`: body back verbatim
//! - `/health`: fixed answer chosen at startup
//! - `/live`: 503 until the warm-up deadline, then 200 "live"
//! - `/call`: GET the URL found in the body and summarize the response
//! - anything else: catch-all echo wrapped in a fixed message
//!
//! Every handler logs the inbound headers first. Body read failures answer 500
//! with an empty body.

use std::error::Error as StdError;
use std::fmt::{self, Write as _};
use std::time::Instant;

use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;
use url::Url;

use crate::http::request::{log_inbound, read_body, RequestIdExt};
use crate::http::server::AppState;

/// Prefix of every catch-all answer.
pub const CATCH_ALL_PREFIX: &str = "default handler echoing: ";

/// Error type for the outbound call probe.
#[derive(Debug, Error)]
pub enum CallError {
    /// Request body is not a usable URL.
    #[error("invalid target: {0}")]
    InvalidTarget(String),

    /// The outbound GET failed.
    #[error("{}", describe(.0))]
    Request(#[source] reqwest::Error),
}

/// What `/call` reports about a successful outbound GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseSummary {
    pub status: StatusCode,
    pub version: axum::http::Version,
    pub headers: usize,
    pub content_length: Option<u64>,
}

impl fmt::Display for ResponseSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "status={} version={:?} headers={} content-length=",
            self.status.as_u16(),
            self.version,
            self.headers
        )?;
        match self.content_length {
            Some(len) => write!(f, "{len}"),
            None => f.write_str("unknown"),
        }
    }
}

pub async fn echo(request: Request<Body>) -> Response {
    log_inbound("echo", &request);
    let request_id = request.request_id().to_string();

    match read_body(request.into_body()).await {
        Ok(body) => (StatusCode::OK, body).into_response(),
        Err(e) => body_read_failed(&request_id, e),
    }
}

pub async fn health(State(state): State<AppState>, request: Request<Body>) -> impl IntoResponse {
    log_inbound("health", &request);
    state.health.response()
}

pub async fn live(State(state): State<AppState>, request: Request<Body>) -> impl IntoResponse {
    log_inbound("liveness", &request);
    state.liveness.response_at(Instant::now())
}

/// Issue a GET to the URL in the request body and report on the response.
///
/// The fetched content is not forwarded; only a one-line summary is.
pub async fn call(State(state): State<AppState>, request: Request<Body>) -> Response {
    log_inbound("call", &request);
    let request_id = request.request_id().to_string();

    let body = match read_body(request.into_body()).await {
        Ok(body) => body,
        Err(e) => return body_read_failed(&request_id, e),
    };
    let target = String::from_utf8_lossy(&body).trim().to_string();
    tracing::info!(request_id = %request_id, target = %target, "Got call target");

    match probe(&state.client, &body).await {
        Ok(summary) => {
            tracing::info!(
                request_id = %request_id,
                target = %target,
                status = summary.status.as_u16(),
                "GET succeeded"
            );
            (StatusCode::OK, format!("got response: {summary}")).into_response()
        }
        Err(e) => {
            tracing::warn!(request_id = %request_id, target = %target, error = %e, "GET failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("GET {target:?} failed: {e}"),
            )
                .into_response()
        }
    }
}

pub async fn catch_all(request: Request<Body>) -> Response {
    log_inbound("catch-all", &request);
    let request_id = request.request_id().to_string();

    match read_body(request.into_body()).await {
        Ok(body) => (StatusCode::OK, catch_all_body(&body)).into_response(),
        Err(e) => body_read_failed(&request_id, e),
    }
}

/// Render the catch-all answer for a request body.
///
/// The body is quoted with valid UTF-8 escaped as in Rust debug output and
/// every invalid byte written as `\xNN`, so distinct bodies never collide.
pub fn catch_all_body(body: &[u8]) -> String {
    let mut out = String::with_capacity(CATCH_ALL_PREFIX.len() + body.len() + 2);
    out.push_str(CATCH_ALL_PREFIX);
    out.push('"');
    for chunk in body.utf8_chunks() {
        for c in chunk.valid().chars() {
            match c {
                '\'' => out.push(c),
                _ => out.extend(c.escape_debug()),
            }
        }
        for byte in chunk.invalid() {
            let _ = write!(out, "\\x{byte:02x}");
        }
    }
    out.push('"');
    out
}

/// GET the target named by `raw` and summarize the response.
pub async fn probe(client: &reqwest::Client, raw: &Bytes) -> Result<ResponseSummary, CallError> {
    let target = std::str::from_utf8(raw)
        .map_err(|e| CallError::InvalidTarget(e.to_string()))?
        .trim();
    let url = Url::parse(target).map_err(|e| CallError::InvalidTarget(e.to_string()))?;

    let response = client.get(url).send().await.map_err(CallError::Request)?;

    Ok(ResponseSummary {
        status: response.status(),
        version: response.version(),
        headers: response.headers().len(),
        content_length: response.content_length(),
    })
}

fn body_read_failed(request_id: &str, error: axum::Error) -> Response {
    tracing::error!(request_id = %request_id, error = %error, "Failed to read request body");
    StatusCode::INTERNAL_SERVER_ERROR.into_response()
}

/// Render an error followed by its source chain.
fn describe(error: &(dyn StdError + 'static)) -> String {
    let mut out = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !out.contains(&cause_text) {
            out.push_str(": ");
            out.push_str(&cause_text);
        }
        source = cause.source();
    }
    out
}
