//! API error taxonomy
//!
//! Every failure in the account core maps onto one of these variants at
//! the request boundary. Callers get a generic `{"message": ...}` body;
//! the interesting detail stays in server-side logs. Invalid credentials
//! deliberately reads the same whether the username exists or not.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("username already exists")]
    DuplicateAccount,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("account locked for another {retry_after_secs}s")]
    AccountLocked { retry_after_secs: i64 },
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: i64 },
    #[error("not authorized")]
    Authorization,
    #[error("account not found")]
    NotFound,
    #[error("storage error")]
    Storage(#[from] sqlx::Error),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::Validation(message) => {
                (StatusCode::BAD_REQUEST, json!({ "message": message }))
            }
            ApiError::DuplicateAccount => (
                StatusCode::BAD_REQUEST,
                json!({ "message": "Username already exists" }),
            ),
            ApiError::InvalidCredentials => (
                StatusCode::BAD_REQUEST,
                json!({ "message": "Invalid credentials" }),
            ),
            ApiError::AccountLocked { .. } => (
                StatusCode::FORBIDDEN,
                json!({ "message": "Account temporarily locked. Try again later." }),
            ),
            ApiError::RateLimited { retry_after_secs } => (
                StatusCode::TOO_MANY_REQUESTS,
                json!({
                    "message": "Too many attempts. Try later.",
                    "retryAfter": retry_after_secs,
                }),
            ),
            ApiError::Authorization => (
                StatusCode::UNAUTHORIZED,
                json!({ "message": "Not authorized" }),
            ),
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                json!({ "message": "User not found" }),
            ),
            ApiError::Storage(err) => {
                tracing::error!(error = ?err, "storage error reached the request boundary");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "message": "Internal server error" }),
                )
            }
            ApiError::Unexpected(err) => {
                tracing::error!(error = ?err, "unexpected error reached the request boundary");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "message": "Internal server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_match_the_taxonomy() {
        let cases = [
            (
                ApiError::Validation("bad username".into()),
                StatusCode::BAD_REQUEST,
            ),
            (ApiError::DuplicateAccount, StatusCode::BAD_REQUEST),
            (ApiError::InvalidCredentials, StatusCode::BAD_REQUEST),
            (
                ApiError::AccountLocked {
                    retry_after_secs: 90,
                },
                StatusCode::FORBIDDEN,
            ),
            (
                ApiError::RateLimited {
                    retry_after_secs: 60,
                },
                StatusCode::TOO_MANY_REQUESTS,
            ),
            (ApiError::Authorization, StatusCode::UNAUTHORIZED),
            (ApiError::NotFound, StatusCode::NOT_FOUND),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn storage_errors_stay_generic() {
        let response = ApiError::Storage(sqlx::Error::PoolClosed).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
