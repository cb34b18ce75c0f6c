// Test code patterns:
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Resumatch API Library
//!
//! Account registration, login with lockout and rate limiting, session
//! token issuance, and the authorization middleware gating profile access.

pub mod accounts;
pub mod auth;
pub mod config;
pub mod error;
pub mod routes;
pub mod security;
pub mod state;

pub use config::Config;
pub use error::{ApiError, ApiResult};
pub use state::AppState;
