//! Startup orchestration.
//!
//! # Responsibilities
//! - Capture probe state (health flag, liveness deadline) once
//! - Build one router per distinct port
//! - Start every listener on its own task and wait for all of them
//!
//! # Design Decisions
//! - Listeners fail independently: a bind or serve error ends only that
//!   listener's task, the others keep serving
//! - Nothing is retried
//! - `run` returns only once every listener has stopped

use std::net::{IpAddr, SocketAddr};

use axum::Router;
use tokio::task::JoinSet;

use crate::config::ServerConfig;
use crate::http::server::{self, AppState, PortPlan};
use crate::net::{self, ListenerError};

/// The set of listeners derived from one configuration.
pub struct ListenerSet {
    host: IpAddr,
    plan: PortPlan,
    state: AppState,
}

impl ListenerSet {
    /// Plan listeners for `config`. The liveness warm-up starts here.
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            host: config.host,
            plan: PortPlan::from_config(config),
            state: AppState::new(config),
        }
    }

    pub fn plan(&self) -> &PortPlan {
        &self.plan
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Serve every planned port until all listeners have stopped.
    ///
    /// Returns the errors that ended each failed listener.
    pub async fn run(self) -> Vec<ListenerError> {
        for (port, endpoints) in self.plan.iter() {
            let paths: Vec<&str> = endpoints.iter().map(|e| e.path()).collect();
            tracing::info!(port, paths = ?paths, "Listening for endpoints");
        }

        let mut listeners = JoinSet::new();
        for (port, endpoints) in self.plan.iter() {
            let router = server::build_router(endpoints, self.state.clone());
            listeners.spawn(serve_port(self.host, port, router));
        }

        let mut failures = Vec::new();
        while let Some(joined) = listeners.join_next().await {
            match joined {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    tracing::error!(address = %e.addr(), error = %e, "Listener exited");
                    failures.push(e);
                }
                Err(e) => tracing::error!(error = %e, "Listener task failed"),
            }
        }

        tracing::warn!(failed = failures.len(), "All listeners have stopped");
        failures
    }
}

async fn serve_port(host: IpAddr, port: u16, router: Router) -> Result<(), ListenerError> {
    tracing::info!(port, "Starting listener");
    let listener = net::bind(host, port).await?;
    let addr = listener
        .local_addr()
        .unwrap_or_else(|_| SocketAddr::new(host, port));

    server::serve(listener, router)
        .await
        .map_err(|source| ListenerError::Serve { addr, source })
}
