//! Login attempt throttling
//!
//! Counts requests per `"{client_ip}_{username}"` key inside a fixed
//! window, independent of whether the username resolves to an account.
//! State is per-process; a horizontally scaled deployment would need an
//! external counter store behind the same check-and-increment call.

use std::sync::Arc;

use dashmap::DashMap;
use time::{Duration, OffsetDateTime};

use crate::clock::Clock;

/// Outcome of a single check-and-increment call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateDecision {
    Allowed,
    Blocked { retry_after: Duration },
}

/// The capability request handlers code against. The in-memory limiter
/// below implements it; a shared external counter store could implement
/// it instead without touching any handler.
pub trait RateLimit: Send + Sync + 'static {
    fn check_and_increment(&self, key: &str) -> RateDecision;
}

#[derive(Debug, Clone, Copy)]
struct Window {
    started_at: OffsetDateTime,
    count: u32,
}

/// Fixed-window request limiter keyed by an opaque string.
#[derive(Clone)]
pub struct RateLimiter {
    windows: Arc<DashMap<String, Window>>,
    max_requests: u32,
    window: Duration,
    clock: Arc<dyn Clock>,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            windows: Arc::new(DashMap::new()),
            max_requests,
            window,
            clock,
        }
    }

    /// Count one request against `key`.
    ///
    /// Windows reset lazily: the first call after a window has elapsed
    /// starts a fresh one. Once `max_requests` calls have landed inside
    /// the current window, further calls are blocked until it closes.
    pub fn check_and_increment(&self, key: &str) -> RateDecision {
        let now = self.clock.now_utc();

        let mut entry = self.windows.entry(key.to_string()).or_insert(Window {
            started_at: now,
            count: 0,
        });

        if now - entry.started_at >= self.window {
            entry.started_at = now;
            entry.count = 0;
        }

        if entry.count >= self.max_requests {
            let retry_after = self.window - (now - entry.started_at);
            return RateDecision::Blocked { retry_after };
        }

        entry.count += 1;
        RateDecision::Allowed
    }

    /// Drop windows that have fully elapsed.
    ///
    /// Keys are unbounded (any address/username pair), so a periodic
    /// sweep keeps the map from accumulating closed windows.
    pub fn sweep(&self) {
        let now = self.clock.now_utc();
        self.windows.retain(|_, w| now - w.started_at < self.window);
        tracing::debug!(live_windows = self.windows.len(), "rate-limit sweep complete");
    }

    /// Number of live windows, for observability.
    pub fn tracked_keys(&self) -> usize {
        self.windows.len()
    }
}

impl RateLimit for RateLimiter {
    fn check_and_increment(&self, key: &str) -> RateDecision {
        RateLimiter::check_and_increment(self, key)
    }
}
