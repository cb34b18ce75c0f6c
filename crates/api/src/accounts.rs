//! Credential store
//!
//! One row per registered account: credentials, the durable lockout
//! counters, and the profile fields the dashboard edits. Login mutations
//! are read-then-write per row; the increment is always based on the
//! value the handler just read (last-writer-wins under concurrent
//! logins).

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: Uuid,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,

    pub failed_login_attempts: i32,
    #[serde(with = "time::serde::rfc3339::option")]
    pub lockout_until: Option<OffsetDateTime>,

    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub mobile_number: String,
    pub portfolio: String,
    pub objective: String,
    pub address: String,

    pub education: serde_json::Value,
    pub skills: serde_json::Value,
    pub experience: serde_json::Value,
    pub projects: serde_json::Value,
    pub certificates: serde_json::Value,
    pub courses: serde_json::Value,
    pub cocurricular: serde_json::Value,
    pub interests: serde_json::Value,

    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Partial profile update; absent fields keep their stored value.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub email: Option<String>,
    pub mobile_number: Option<String>,
    pub portfolio: Option<String>,
    pub objective: Option<String>,
    pub address: Option<String>,
    pub education: Option<serde_json::Value>,
    pub skills: Option<serde_json::Value>,
    pub experience: Option<serde_json::Value>,
    pub projects: Option<serde_json::Value>,
    pub certificates: Option<serde_json::Value>,
    pub courses: Option<serde_json::Value>,
    pub cocurricular: Option<serde_json::Value>,
    pub interests: Option<serde_json::Value>,
}

pub async fn find_by_username(pool: &PgPool, username: &str) -> ApiResult<Option<Account>> {
    let account = sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE username = $1")
        .bind(username)
        .fetch_optional(pool)
        .await?;

    Ok(account)
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> ApiResult<Option<Account>> {
    let account = sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(account)
}

/// Insert a new account with an already-hashed password.
///
/// A concurrent registration racing past the handler's duplicate lookup
/// lands on the unique constraint and surfaces as the duplicate error,
/// so exactly one account per username ever exists.
pub async fn create_account(
    pool: &PgPool,
    username: &str,
    password_hash: &str,
) -> ApiResult<Account> {
    let result = sqlx::query_as::<_, Account>(
        r#"
        INSERT INTO accounts (username, password_hash)
        VALUES ($1, $2)
        RETURNING *
        "#,
    )
    .bind(username)
    .bind(password_hash)
    .fetch_one(pool)
    .await;

    match result {
        Ok(account) => Ok(account),
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            Err(ApiError::DuplicateAccount)
        }
        Err(err) => Err(err.into()),
    }
}

/// Write back the failure counter (and lockout expiry, when armed) that
/// the login handler computed from the row it read.
pub async fn record_login_failure(
    pool: &PgPool,
    id: Uuid,
    failed_login_attempts: i32,
    lockout_until: Option<OffsetDateTime>,
) -> ApiResult<()> {
    sqlx::query(
        r#"
        UPDATE accounts
        SET failed_login_attempts = $2,
            lockout_until = $3,
            updated_at = NOW()
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(failed_login_attempts)
    .bind(lockout_until)
    .execute(pool)
    .await?;

    Ok(())
}

/// Successful login: counter back to zero, lockout cleared.
pub async fn clear_login_failures(pool: &PgPool, id: Uuid) -> ApiResult<()> {
    sqlx::query(
        r#"
        UPDATE accounts
        SET failed_login_attempts = 0,
            lockout_until = NULL,
            updated_at = NOW()
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Apply a partial profile update; returns the updated row, or `None`
/// when the account no longer exists.
pub async fn update_profile(
    pool: &PgPool,
    id: Uuid,
    update: &ProfileUpdate,
) -> ApiResult<Option<Account>> {
    let account = sqlx::query_as::<_, Account>(
        r#"
        UPDATE accounts
        SET firstname     = COALESCE($2, firstname),
            lastname      = COALESCE($3, lastname),
            email         = COALESCE($4, email),
            mobile_number = COALESCE($5, mobile_number),
            portfolio     = COALESCE($6, portfolio),
            objective     = COALESCE($7, objective),
            address       = COALESCE($8, address),
            education     = COALESCE($9, education),
            skills        = COALESCE($10, skills),
            experience    = COALESCE($11, experience),
            projects      = COALESCE($12, projects),
            certificates  = COALESCE($13, certificates),
            courses       = COALESCE($14, courses),
            cocurricular  = COALESCE($15, cocurricular),
            interests     = COALESCE($16, interests),
            updated_at    = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&update.firstname)
    .bind(&update.lastname)
    .bind(&update.email)
    .bind(&update.mobile_number)
    .bind(&update.portfolio)
    .bind(&update.objective)
    .bind(&update.address)
    .bind(&update.education)
    .bind(&update.skills)
    .bind(&update.experience)
    .bind(&update.projects)
    .bind(&update.certificates)
    .bind(&update.courses)
    .bind(&update.cocurricular)
    .bind(&update.interests)
    .fetch_optional(pool)
    .await?;

    Ok(account)
}
