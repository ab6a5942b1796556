//! Configuration schema definitions.
//!
//! This module defines the runtime configuration of the diagnostic server and
//! the endpoints it can expose. Values are produced once by the loader and are
//! read-only afterwards.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

/// Port used by every listener unless overridden.
pub const DEFAULT_PORT: u16 = 9000;

/// Warm-up window before `/live` starts answering 200.
pub const DEFAULT_LIVENESS_DELAY: Duration = Duration::from_secs(1);

/// Root configuration for the diagnostic server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Interface every listener binds to.
    pub host: IpAddr,

    /// Port serving `/echo` and `/call`.
    pub server_port: u16,

    /// Port serving `/health`.
    pub health_port: u16,

    /// Port serving `/live`.
    pub liveness_port: u16,

    /// Fixed answer of the health endpoint.
    pub healthy: bool,

    /// Delay before the liveness endpoint reports ready.
    pub liveness_delay: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            server_port: DEFAULT_PORT,
            health_port: DEFAULT_PORT,
            liveness_port: DEFAULT_PORT,
            healthy: true,
            liveness_delay: DEFAULT_LIVENESS_DELAY,
        }
    }
}

/// A logical endpoint exposed by the server.
///
/// Each endpoint lives at a fixed path; which port serves it is decided by
/// [`ServerConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Endpoint {
    Echo,
    Call,
    Health,
    Live,
}

impl Endpoint {
    /// All endpoints, in display order.
    pub const ALL: [Endpoint; 4] = [Endpoint::Echo, Endpoint::Call, Endpoint::Health, Endpoint::Live];

    /// Request path the endpoint is mounted on.
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Echo => "/echo",
            Endpoint::Call => "/call",
            Endpoint::Health => "/health",
            Endpoint::Live => "/live",
        }
    }

    /// Port the endpoint is served on under the given configuration.
    pub fn port(self, config: &ServerConfig) -> u16 {
        match self {
            Endpoint::Echo | Endpoint::Call => config.server_port,
            Endpoint::Health => config.health_port,
            Endpoint::Live => config.liveness_port,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
