//! Registration, login, and profile handlers
//!
//! Login runs its gates in a fixed order: rate limiter first (it must
//! fire even for usernames that resolve to nothing), then the lockout
//! check, then the password comparison. Misses on either of the last two
//! get a randomized delay so response timing does not reveal whether the
//! username exists.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, State};
use axum::http::header::{HeaderValue, SET_COOKIE};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use rand::Rng;
use serde::Deserialize;
use serde_json::json;

use resumatch_shared::{Clock, RateDecision, RateLimit};

use crate::accounts::{self, Account, ProfileUpdate};
use crate::auth::middleware::{forwarded_client_ip, AuthUser, SESSION_COOKIE};
use crate::auth::{self, LockoutPolicy};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<Credentials>,
) -> ApiResult<Json<serde_json::Value>> {
    auth::validate_username(&body.username)?;

    if accounts::find_by_username(&state.pool, &body.username)
        .await?
        .is_some()
    {
        return Err(ApiError::DuplicateAccount);
    }

    auth::validate_password(&body.password)?;

    // bcrypt is CPU-bound; run it off the reactor.
    let cost = state.config.bcrypt_cost;
    let password = body.password;
    let password_hash = tokio::task::spawn_blocking(move || auth::hash_password(&password, cost))
        .await
        .map_err(|e| ApiError::Unexpected(e.into()))?
        .map_err(|e| ApiError::Unexpected(e.into()))?;

    accounts::create_account(&state.pool, &body.username, &password_hash).await?;
    tracing::info!(username = %body.username, "account registered");

    Ok(Json(json!({ "message": "Registration successful" })))
}

pub async fn login(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(body): Json<Credentials>,
) -> ApiResult<Response> {
    // Rate limit before anything else: the throttle is keyed on the
    // attempted username, valid account or not.
    let client_ip = forwarded_client_ip(&headers).unwrap_or_else(|| peer.ip().to_string());
    let rate_key = format!("{}_{}", client_ip, body.username);

    if let RateDecision::Blocked { retry_after } =
        state.rate_limiter.check_and_increment(&rate_key)
    {
        tracing::warn!(
            username = %body.username,
            client_ip = %client_ip,
            "login rate limit exceeded"
        );
        return Err(ApiError::RateLimited {
            retry_after_secs: retry_after.whole_seconds().max(1),
        });
    }

    let Some(account) = accounts::find_by_username(&state.pool, &body.username).await? else {
        randomized_delay().await;
        return Err(ApiError::InvalidCredentials);
    };

    // Locked accounts are rejected before any password comparison and
    // without touching the failure counter.
    let now = state.clock.now_utc();
    if LockoutPolicy::is_locked(account.lockout_until, now) {
        let retry_after_secs = account
            .lockout_until
            .map(|until| LockoutPolicy::remaining_secs(until, now))
            .unwrap_or(0);
        tracing::warn!(
            username = %body.username,
            retry_after_secs,
            "login attempt on locked account"
        );
        return Err(ApiError::AccountLocked { retry_after_secs });
    }

    let password = body.password;
    let stored_hash = account.password_hash.clone();
    let is_match =
        tokio::task::spawn_blocking(move || auth::verify_password(&password, &stored_hash))
            .await
            .map_err(|e| ApiError::Unexpected(e.into()))?
            .map_err(|e| ApiError::Unexpected(e.into()))?;

    if !is_match {
        // Increment is based on the value read above; last-writer-wins
        // under concurrent logins.
        let failed_attempts = account.failed_login_attempts + 1;
        let lockout_until = LockoutPolicy::default()
            .lockout_after(failed_attempts as u32)
            .map(|duration| now + duration);

        accounts::record_login_failure(&state.pool, account.id, failed_attempts, lockout_until)
            .await?;

        if lockout_until.is_some() {
            tracing::warn!(
                username = %body.username,
                failed_attempts,
                "account locked after repeated failures"
            );
        }

        randomized_delay().await;
        return Err(ApiError::InvalidCredentials);
    }

    accounts::clear_login_failures(&state.pool, account.id).await?;

    let token = state
        .jwt_manager
        .generate_token(account.id, &account.username)
        .map_err(|e| ApiError::Unexpected(e.into()))?;
    let cookie = session_cookie(
        &token,
        state.jwt_manager.ttl_secs(),
        state.config.cookie_secure(),
    );

    tracing::info!(username = %account.username, "user logged in");

    let mut response =
        (StatusCode::OK, Json(json!({ "message": "Login successful" }))).into_response();
    response.headers_mut().insert(
        SET_COOKIE,
        HeaderValue::from_str(&cookie).map_err(|e| ApiError::Unexpected(e.into()))?,
    );
    Ok(response)
}

pub async fn get_profile(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> ApiResult<Json<Account>> {
    let account = accounts::find_by_id(&state.pool, auth.account_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(account))
}

pub async fn update_profile(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(update): Json<ProfileUpdate>,
) -> ApiResult<Json<Account>> {
    let account = accounts::update_profile(&state.pool, auth.account_id, &update)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(account))
}

/// Session cookie mirroring the token lifetime. HttpOnly keeps it away
/// from scripts; Strict same-site keeps it off cross-origin requests;
/// Secure is added in production.
fn session_cookie(token: &str, max_age_secs: i64, secure: bool) -> String {
    let mut cookie = format!(
        "{SESSION_COOKIE}={token}; Max-Age={max_age_secs}; Path=/; HttpOnly; SameSite=Strict"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Uniform 500-3000ms pause applied before every invalid-credentials
/// response. Required behavior: it blunts timing-based username
/// enumeration, so it runs whether the miss was an unknown username or a
/// wrong password.
async fn randomized_delay() {
    let ms: u64 = rand::rng().random_range(500..=3000);
    tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
}
