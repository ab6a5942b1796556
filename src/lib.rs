//! Diagnostic HTTP server library.
//!
//! Serves echo, health, liveness and outbound-call probes for testing
//! infrastructure such as service meshes and load balancers. Each probe can be
//! placed on its own port; probes sharing a port share a listener.

pub mod config;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;

pub use config::{load_config, ServerConfig};
pub use http::{build_router, AppState, PortPlan};
pub use lifecycle::ListenerSet;
