//! TCP listener binding.
//!
//! # Responsibilities
//! - Bind one TCP listener per configured port
//! - Report bind and serve failures with the address they concern

use std::io;
use std::net::{IpAddr, SocketAddr};

use thiserror::Error;
use tokio::net::TcpListener;

/// Error type for listener operations.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// Failed to bind to address.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    /// The accept loop terminated with an error.
    #[error("listener on {addr} stopped: {source}")]
    Serve {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },
}

impl ListenerError {
    /// Address the failing listener was meant to serve.
    pub fn addr(&self) -> SocketAddr {
        match self {
            ListenerError::Bind { addr, .. } | ListenerError::Serve { addr, .. } => *addr,
        }
    }
}

/// Bind a TCP listener on `host:port`.
pub async fn bind(host: IpAddr, port: u16) -> Result<TcpListener, ListenerError> {
    let addr = SocketAddr::new(host, port);
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ListenerError::Bind { addr, source })?;

    tracing::info!(address = %addr, "Listener bound");
    Ok(listener)
}
