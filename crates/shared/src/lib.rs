#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Shared infrastructure for the Resumatch services
//!
//! Database pool construction, the injectable clock, and the login
//! rate limiter consumed by the API crate.

pub mod clock;
pub mod db;
pub mod rate_limit;

pub use clock::{Clock, SystemClock};
pub use db::create_pool;
pub use rate_limit::{RateDecision, RateLimit, RateLimiter};
