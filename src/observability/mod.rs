//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and listeners produce:
//!     → logging.rs (structured log events, stdout)
//!     → tower_http TraceLayer (per-request spans)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through every request log line
//! - No metrics pipeline; logs are the only output

pub mod logging;

pub use logging::init_logging;
