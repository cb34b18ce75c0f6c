//! Session token issuance and verification
//!
//! HS256 tokens binding the account id and username, expiring 30 minutes
//! after issuance. Validity is purely cryptographic plus time-based;
//! nothing is persisted server-side and there is no revocation list.

use std::sync::Arc;

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::Duration;
use uuid::Uuid;

use resumatch_shared::Clock;

/// Session lifetime; the cookie max-age mirrors this.
pub const SESSION_TTL: Duration = Duration::minutes(30);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Account id.
    pub sub: Uuid,
    pub username: String,
    /// Issued-at, unix seconds.
    pub iat: i64,
    /// Expiry, unix seconds.
    pub exp: i64,
}

/// Why a token was rejected. Callers only ever see an authorization
/// rejection; the distinction exists for server-side logs.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("invalid signature")]
    InvalidSignature,
    #[error("malformed token")]
    Malformed,
    #[error("token signing failed")]
    Signing,
}

#[derive(Clone)]
pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl JwtManager {
    pub fn new(secret: &str, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
            clock,
        }
    }

    /// Sign a session token for the given account.
    pub fn generate_token(&self, account_id: Uuid, username: &str) -> Result<String, TokenError> {
        let now = self.clock.now_utc();
        let claims = Claims {
            sub: account_id,
            username: username.to_string(),
            iat: now.unix_timestamp(),
            exp: (now + self.ttl).unix_timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|_| TokenError::Signing)
    }

    /// Verify a token, distinguishing expiry, bad signature, and
    /// malformed input.
    pub fn verify_token(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        match decode::<Claims>(token, &self.decoding_key, &validation) {
            Ok(data) => Ok(data.claims),
            Err(err) => match err.kind() {
                ErrorKind::ExpiredSignature => Err(TokenError::Expired),
                ErrorKind::InvalidSignature => Err(TokenError::InvalidSignature),
                _ => Err(TokenError::Malformed),
            },
        }
    }

    /// Session lifetime in whole seconds, for the cookie max-age.
    pub fn ttl_secs(&self) -> i64 {
        self.ttl.whole_seconds()
    }
}
