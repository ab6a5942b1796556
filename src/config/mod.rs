//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! command-line flags
//!     → loader.rs (clap parse, duration parsing)
//!     → ServerConfig (immutable)
//!     → read by the listener set and handler state at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; nothing is reloaded at runtime
//! - Every flag has a default, so running with no arguments serves all
//!   endpoints on port 9000
//! - No semantic validation beyond what clap performs (port collisions are
//!   intentional and merge listeners)

pub mod loader;
pub mod schema;

pub use loader::{load_config, parse_duration, Cli, ConfigError};
pub use schema::{Endpoint, ServerConfig, DEFAULT_LIVENESS_DELAY, DEFAULT_PORT};
