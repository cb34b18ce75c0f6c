//! HTTP routes

pub mod users;

use axum::routing::{get, post};
use axum::{middleware, Json, Router};
use serde_json::json;

use crate::auth::require_auth;
use crate::state::AppState;

/// Build the full application router.
///
/// Profile routes sit behind the authorization middleware; registration
/// and login are public.
pub fn create_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/api/user/profile", get(users::get_profile))
        .route("/api/user/update", post(users::update_profile))
        .route_layer(middleware::from_fn_with_state(
            state.auth_state(),
            require_auth,
        ));

    Router::new()
        .route("/health", get(health))
        .route("/api/user/register", post(users::register))
        .route("/api/user/login", post(users::login))
        .merge(protected)
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
