//! Diagnostic HTTP server.
//!
//! # Architecture Overview
//!
//! ```text
//!   flags ──▶ config ──▶ PortPlan: port → {endpoints}
//!                             │
//!              ┌──────────────┼──────────────┐
//!              ▼              ▼              ▼
//!         listener :s    listener :c    listener :l     (one task per distinct port)
//!         /echo /call    /health        /live
//!              └── every router: catch-all fallback, request ID, trace ──┘
//! ```
//!
//! The main task waits until every listener has stopped.

use diag_server::config::load_config;
use diag_server::lifecycle::ListenerSet;
use diag_server::observability::init_logging;

/// Exit status for command-line errors.
const EXIT_CLI_ERROR: i32 = -1;

#[tokio::main]
async fn main() {
    init_logging();

    let config = match load_config(std::env::args_os()) {
        Ok(config) => config,
        // --help and --version
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            tracing::error!(kind = ?e.kind(), "Failed to parse command line");
            std::process::exit(EXIT_CLI_ERROR);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        host = %config.host,
        server_port = config.server_port,
        health_port = config.health_port,
        liveness_port = config.liveness_port,
        healthy = config.healthy,
        liveness_delay = ?config.liveness_delay,
        "diag-server starting"
    );

    let failures = ListenerSet::new(&config).run().await;
    tracing::info!(failed_listeners = failures.len(), "Exiting");
}
