//! Account lockout policy
//!
//! Per-account failure counting with a timed lockout. The counters live
//! on the account row, so lockouts survive restarts; this module holds
//! the pure arithmetic the login path applies to a row it just read.
//!
//! - failures 1-2: counted, no lockout
//! - failure 3 and every failure after it: lockout re-armed for 2 minutes
//! - while locked: attempts rejected before any password comparison,
//!   counter untouched
//! - after expiry: the next attempt is evaluated normally; success resets
//!   everything, failure re-enters the failure path and relocks

use time::{Duration, OffsetDateTime};

/// Failures allowed before the lockout arms.
const LOCKOUT_THRESHOLD: u32 = 3;

/// How long a triggered lockout lasts.
const LOCKOUT_DURATION: Duration = Duration::minutes(2);

#[derive(Debug, Clone, Copy)]
pub struct LockoutPolicy {
    pub threshold: u32,
    pub duration: Duration,
}

impl Default for LockoutPolicy {
    fn default() -> Self {
        Self {
            threshold: LOCKOUT_THRESHOLD,
            duration: LOCKOUT_DURATION,
        }
    }
}

impl LockoutPolicy {
    /// Lockout duration to arm after a failure left the account at
    /// `failed_attempts`, or `None` while still under the threshold.
    pub fn lockout_after(&self, failed_attempts: u32) -> Option<Duration> {
        if failed_attempts >= self.threshold {
            Some(self.duration)
        } else {
            None
        }
    }

    /// An account is locked while `lockout_until` is strictly in the
    /// future. The exact expiry instant counts as unlocked.
    pub fn is_locked(lockout_until: Option<OffsetDateTime>, now: OffsetDateTime) -> bool {
        matches!(lockout_until, Some(until) if until > now)
    }

    /// Whole seconds until the lockout expires, floored at zero.
    pub fn remaining_secs(lockout_until: OffsetDateTime, now: OffsetDateTime) -> i64 {
        (lockout_until - now).whole_seconds().max(0)
    }
}
