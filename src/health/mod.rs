//! Probe state subsystem.
//!
//! # Data Flow
//! ```text
//! Health (state.rs):
//!     --healthy flag → HealthFlag → /health answer (fixed)
//!
//! Liveness (liveness.rs):
//!     --liveness-delay → LivenessGate (deadline = start + delay)
//!     → /live compares the deadline with the current time
//! ```
//!
//! # Design Decisions
//! - Both values are captured once at startup and passed to handlers as
//!   state; there are no globals and nothing mutable
//! - Not live → live is one-way

pub mod liveness;
pub mod state;

pub use liveness::{LivenessGate, LIVE_BODY};
pub use state::{HealthFlag, HEALTHY_BODY};
