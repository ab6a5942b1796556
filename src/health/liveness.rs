//! Liveness warm-up window.
//!
//! # Responsibilities
//! - Compute the liveness deadline once at startup (now + delay)
//! - Decide per request whether the deadline has passed
//!
//! # Design Decisions
//! - Monotonic clock (`Instant`), so wall-clock jumps cannot make the server
//!   report "not live" again after it went live
//! - The deadline is immutable; the gate is `Copy` and shared by value

use std::time::{Duration, Instant};

use axum::http::StatusCode;

/// Body returned once the server reports live.
pub const LIVE_BODY: &str = "live";

/// Point in time after which `/live` reports ready.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LivenessGate {
    deadline: Instant,
}

impl LivenessGate {
    /// Start the warm-up window now.
    pub fn new(delay: Duration) -> Self {
        Self::starting_at(Instant::now(), delay)
    }

    /// Start the warm-up window at `start`.
    pub fn starting_at(start: Instant, delay: Duration) -> Self {
        // Saturate instead of overflowing for absurd delays; such a gate never opens.
        let deadline = start.checked_add(delay).unwrap_or_else(|| far_future(start));
        tracing::info!(delay = ?delay, "Liveness gate armed, will report live after delay");
        Self { deadline }
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Whether the deadline has passed at `now`.
    pub fn is_live_at(&self, now: Instant) -> bool {
        now >= self.deadline
    }

    pub fn is_live(&self) -> bool {
        self.is_live_at(Instant::now())
    }

    /// Status and body the liveness endpoint answers with at `now`.
    pub fn response_at(&self, now: Instant) -> (StatusCode, &'static str) {
        if self.is_live_at(now) {
            (StatusCode::OK, LIVE_BODY)
        } else {
            (StatusCode::SERVICE_UNAVAILABLE, "")
        }
    }
}

fn far_future(start: Instant) -> Instant {
    let mut step = Duration::from_secs(u64::MAX / 2);
    loop {
        if let Some(deadline) = start.checked_add(step) {
            return deadline;
        }
        step /= 2;
    }
}
