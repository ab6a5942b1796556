//! Health-check answer captured at startup.
//!
//! # States
//! - Healthy: `/health` answers 200 "healthy"
//! - Unhealthy: `/health` answers 503 with an empty body
//!
//! The state is chosen by the `--healthy` flag and never changes while the
//! process runs.

use axum::http::StatusCode;

/// Body returned by a healthy health check.
pub const HEALTHY_BODY: &str = "healthy";

/// Fixed health state reported by the health endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthFlag {
    healthy: bool,
}

impl HealthFlag {
    pub fn new(healthy: bool) -> Self {
        Self { healthy }
    }

    pub fn is_healthy(&self) -> bool {
        self.healthy
    }

    /// Status and body the health endpoint answers with.
    pub fn response(&self) -> (StatusCode, &'static str) {
        if self.healthy {
            (StatusCode::OK, HEALTHY_BODY)
        } else {
            (StatusCode::SERVICE_UNAVAILABLE, "")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn healthy_flag_answers_ok() {
        let flag = HealthFlag::new(true);
        assert!(flag.is_healthy());
        assert_eq!(flag.response(), (StatusCode::OK, "healthy"));
    }

    #[test]
    fn unhealthy_flag_answers_unavailable() {
        let flag = HealthFlag::new(false);
        assert!(!flag.is_healthy());
        assert_eq!(flag.response(), (StatusCode::SERVICE_UNAVAILABLE, ""));
    }
}
