//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! (host, port)
//!     → listener.rs (bind)
//!     → Hand off to HTTP layer (axum accept loop)
//! ```
//!
//! # Design Decisions
//! - One socket per distinct port; roles sharing a port share the socket
//! - Failures carry the address so each listener's log line stands alone

pub mod listener;

pub use listener::{bind, ListenerError};
