//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     ServerConfig → PortPlan + AppState → one listener task per port
//!     → wait until every listener task has exited
//! ```
//!
//! # Design Decisions
//! - No graceful shutdown: the process ends on an external signal or when
//!   every listener has failed
//! - The main task is the completion barrier for all listener tasks

pub mod startup;

pub use startup::ListenerSet;
