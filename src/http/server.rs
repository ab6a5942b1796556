//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Group endpoints by the port that serves them (`PortPlan`)
//! - Create one Axum Router per port with that port's endpoints
//! - Install the catch-all fallback on every router
//! - Wire up middleware (request ID, tracing)
//! - Serve a router on a bound listener

use std::collections::{BTreeMap, BTreeSet};

use axum::{routing::any, Router};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::{Endpoint, ServerConfig};
use crate::health::{HealthFlag, LivenessGate};
use crate::http::handlers;
use crate::http::request::UuidRequestId;

/// Application state injected into handlers.
///
/// Captured once at startup and shared read-only by every listener.
#[derive(Clone)]
pub struct AppState {
    pub health: HealthFlag,
    pub liveness: LivenessGate,
    pub client: reqwest::Client,
}

impl AppState {
    /// Capture probe state from the configuration. Starts the liveness clock.
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            health: HealthFlag::new(config.healthy),
            liveness: LivenessGate::new(config.liveness_delay),
            client: reqwest::Client::new(),
        }
    }
}

/// Endpoints grouped by the port serving them.
///
/// Roles configured on the same port are merged into a single entry, so each
/// port maps to exactly one listener.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortPlan {
    ports: BTreeMap<u16, BTreeSet<Endpoint>>,
}

impl PortPlan {
    pub fn from_config(config: &ServerConfig) -> Self {
        let mut plan = Self::default();
        for endpoint in Endpoint::ALL {
            plan.assign(endpoint.port(config), endpoint);
        }
        plan
    }

    /// Serve `endpoint` on `port`, alongside anything already there.
    pub fn assign(&mut self, port: u16, endpoint: Endpoint) {
        self.ports.entry(port).or_default().insert(endpoint);
    }

    /// Distinct ports, ascending.
    pub fn ports(&self) -> impl Iterator<Item = u16> + '_ {
        self.ports.keys().copied()
    }

    pub fn endpoints(&self, port: u16) -> Option<&BTreeSet<Endpoint>> {
        self.ports.get(&port)
    }

    pub fn len(&self) -> usize {
        self.ports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u16, &BTreeSet<Endpoint>)> {
        self.ports.iter().map(|(port, endpoints)| (*port, endpoints))
    }
}

/// Build the router for one listener.
///
/// Only the given endpoints are routed; every other path, `/` included, goes to
/// the catch-all handler.
pub fn build_router<'a>(endpoints: impl IntoIterator<Item = &'a Endpoint>, state: AppState) -> Router {
    let mut router = Router::new();
    for endpoint in endpoints {
        router = match endpoint {
            Endpoint::Echo => router.route(endpoint.path(), any(handlers::echo)),
            Endpoint::Call => router.route(endpoint.path(), any(handlers::call)),
            Endpoint::Health => router.route(endpoint.path(), any(handlers::health)),
            Endpoint::Live => router.route(endpoint.path(), any(handlers::live)),
        };
    }

    router
        .fallback(handlers::catch_all)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
}

/// Serve `router` on `listener` until the accept loop fails.
pub async fn serve(listener: TcpListener, router: Router) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!(address = %addr, "HTTP server starting");

    axum::serve(listener, router).await?;

    tracing::info!(address = %addr, "HTTP server stopped");
    Ok(())
}
