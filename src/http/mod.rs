//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection (one listener per port)
//!     → server.rs (per-port Axum router, middleware)
//!     → request.rs (request ID, header logging, body buffering)
//!     → handlers.rs (echo / health / live / call / catch-all)
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod server;

pub use request::{RequestIdExt, UuidRequestId, X_REQUEST_ID};
pub use server::{build_router, AppState, PortPlan};
