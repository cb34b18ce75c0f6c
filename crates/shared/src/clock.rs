//! Injectable time source
//!
//! Lockout expiry, rate-limit windows, and token issuance all compare
//! against "now". Routing every read through a single `Clock` keeps those
//! checks deterministic under test.

use time::OffsetDateTime;

/// A source of the current UTC time.
pub trait Clock: Send + Sync + 'static {
    fn now_utc(&self) -> OffsetDateTime;
}

/// Wall-clock time. The only implementation used outside tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_tracks_real_time() {
        let clock = SystemClock;
        let a = clock.now_utc();
        let b = clock.now_utc();
        assert!(b >= a);
    }

    #[test]
    fn manual_clock_advances_only_on_demand() {
        let start = OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap();
        let clock = test_support::ManualClock::new(start);
        assert_eq!(clock.now_utc(), start);

        clock.advance(time::Duration::seconds(90));
        assert_eq!(clock.now_utc(), start + time::Duration::seconds(90));
    }
}
