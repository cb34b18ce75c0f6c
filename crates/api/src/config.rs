//! Environment configuration
//!
//! Everything is read once at startup. A missing signing secret or
//! database URL is fatal: the process refuses to start rather than run
//! without the ability to sign sessions or reach the credential store.

use anyhow::Context;

/// Default bcrypt cost factor when `BCRYPT_COST` is unset.
const DEFAULT_BCRYPT_COST: u32 = 12;

#[derive(Debug, Clone)]
pub struct Config {
    /// Secret used to sign session tokens. Required.
    pub secret_key: String,
    /// Postgres connection string. Required.
    pub database_url: String,
    /// Cost factor for password hashing.
    pub bcrypt_cost: u32,
    /// Address the HTTP server binds to.
    pub bind_address: String,
    /// Comma-separated CORS origin allowlist.
    pub allowed_origins: String,
    /// Deployment environment; "production" enables Secure cookies.
    pub environment: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let secret_key = std::env::var("SECRET_KEY")
            .context("SECRET_KEY must be set (session tokens cannot be signed without it)")?;

        let database_url =
            std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let bcrypt_cost = match std::env::var("BCRYPT_COST") {
            Ok(raw) => raw
                .parse::<u32>()
                .context("BCRYPT_COST must be a positive integer")?,
            Err(_) => DEFAULT_BCRYPT_COST,
        };

        let bind_address =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:5000".to_string());

        let allowed_origins = std::env::var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string());

        let environment =
            std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        Ok(Self {
            secret_key,
            database_url,
            bcrypt_cost,
            bind_address,
            allowed_origins,
            environment,
        })
    }

    /// Session cookies carry `Secure` only in production so local
    /// development over plain HTTP still works.
    pub fn cookie_secure(&self) -> bool {
        self.environment == "production"
    }
}
