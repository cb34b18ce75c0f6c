//! Application state

use std::sync::Arc;

use sqlx::PgPool;

use resumatch_shared::{Clock, RateLimit, RateLimiter, SystemClock};

use crate::auth::jwt::SESSION_TTL;
use crate::auth::{AuthState, JwtManager};
use crate::config::Config;

/// Login attempts allowed per (client, username) window.
const LOGIN_RATE_LIMIT_MAX: u32 = 5;

/// Length of one rate-limit window.
const LOGIN_RATE_LIMIT_WINDOW: time::Duration = time::Duration::minutes(2);

/// How often closed rate-limit windows are swept out of memory.
const RATE_LIMIT_SWEEP_INTERVAL: std::time::Duration = std::time::Duration::from_secs(300);

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Config,
    pub jwt_manager: JwtManager,
    /// Per-(client, username) login throttle. Backed by in-process
    /// state here; a horizontally scaled deployment would swap in an
    /// external counter store behind the same capability.
    pub rate_limiter: Arc<dyn RateLimit>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(pool: PgPool, config: Config) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);

        let jwt_manager = JwtManager::new(&config.secret_key, SESSION_TTL, clock.clone());
        tracing::info!(
            ttl_minutes = SESSION_TTL.whole_minutes(),
            "session token manager initialized"
        );

        let rate_limiter = RateLimiter::new(
            LOGIN_RATE_LIMIT_MAX,
            LOGIN_RATE_LIMIT_WINDOW,
            clock.clone(),
        );
        tracing::info!(
            max_attempts = LOGIN_RATE_LIMIT_MAX,
            window_secs = LOGIN_RATE_LIMIT_WINDOW.whole_seconds(),
            "login rate limiter initialized"
        );

        // Sweep closed rate-limit windows so the map stays bounded.
        let limiter_for_sweep = rate_limiter.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(RATE_LIMIT_SWEEP_INTERVAL);
            loop {
                interval.tick().await;
                limiter_for_sweep.sweep();
            }
        });

        Self {
            pool,
            config,
            jwt_manager,
            rate_limiter: Arc::new(rate_limiter),
            clock,
        }
    }

    /// Get auth state for middleware
    pub fn auth_state(&self) -> AuthState {
        AuthState {
            jwt_manager: self.jwt_manager.clone(),
        }
    }
}
