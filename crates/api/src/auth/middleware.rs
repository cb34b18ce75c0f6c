//! Authorization middleware for Axum
//!
//! The core is `authenticate_request`: a pure function from a request to
//! an authenticated identity or a rejection, with no store access. The
//! axum layer around it attaches the identity to request extensions so
//! protected handlers can extract it, and short-circuits with 401
//! otherwise.

use axum::extract::{Request, State};
use axum::http::header::COOKIE;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use uuid::Uuid;

use super::jwt::JwtManager;

/// Name of the session cookie set on login.
pub const SESSION_COOKIE: &str = "token";

/// Identity decoded from a verified session token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub account_id: Uuid,
    pub username: String,
}

/// State needed for authorization checks.
#[derive(Clone)]
pub struct AuthState {
    pub jwt_manager: JwtManager,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("missing session cookie")]
    MissingToken,
    #[error("invalid or expired session token")]
    InvalidToken,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        // One generic body for every rejection; the reason stays in logs.
        let body = Json(json!({ "message": "Not authorized" }));
        (StatusCode::UNAUTHORIZED, body).into_response()
    }
}

/// Pull the session token out of the Cookie header.
fn extract_token_from_cookie(request: &Request) -> Option<String> {
    request
        .headers()
        .get(COOKIE)
        .and_then(|h| h.to_str().ok())
        .and_then(|cookies| {
            for cookie in cookies.split(';') {
                let cookie = cookie.trim();
                if let Some(token) = cookie.strip_prefix("token=") {
                    return Some(token.to_string());
                }
            }
            None
        })
}

/// Extract the client address from proxy headers (X-Forwarded-For,
/// X-Real-IP), if present.
pub fn forwarded_client_ip(request_headers: &axum::http::HeaderMap) -> Option<String> {
    // X-Forwarded-For may contain multiple hops; the first is the client.
    if let Some(xff) = request_headers.get("X-Forwarded-For") {
        if let Ok(xff_str) = xff.to_str() {
            return xff_str.split(',').next().map(|s| s.trim().to_string());
        }
    }
    if let Some(real_ip) = request_headers.get("X-Real-IP") {
        if let Ok(ip) = real_ip.to_str() {
            return Some(ip.to_string());
        }
    }
    None
}

/// Verify the session token carried by `request`.
///
/// Side-effect free: reads the cookie, verifies the signature and expiry,
/// and returns the embedded identity. Never touches the account store.
pub fn authenticate_request(
    jwt_manager: &JwtManager,
    request: &Request,
) -> Result<AuthUser, AuthError> {
    let token = extract_token_from_cookie(request).ok_or(AuthError::MissingToken)?;

    match jwt_manager.verify_token(&token) {
        Ok(claims) => Ok(AuthUser {
            account_id: claims.sub,
            username: claims.username,
        }),
        Err(reason) => {
            // Distinct failure reasons are logged but never surfaced.
            tracing::warn!(path = %request.uri().path(), %reason, "session token rejected");
            Err(AuthError::InvalidToken)
        }
    }
}

/// Middleware that requires a valid session cookie.
pub async fn require_auth(
    State(auth_state): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    match authenticate_request(&auth_state.jwt_manager, &request) {
        Ok(auth_user) => {
            request.extensions_mut().insert(auth_user);
            next.run(request).await
        }
        Err(err) => {
            tracing::warn!(path = %request.uri().path(), error = %err, "request rejected");
            err.into_response()
        }
    }
}
