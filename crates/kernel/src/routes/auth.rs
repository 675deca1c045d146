//! Login and logout.
//!
//! Logging in opens the database connection with the supplied account;
//! logging out closes it. Both answer with a bare JSON boolean.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tracing::{info, warn};

use crate::db::Credentials;
use crate::state::AppState;

/// Login request body.
#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login handler.
///
/// POST /api/login
async fn login(State(state): State<AppState>, Json(request): Json<LoginRequest>) -> Json<bool> {
    let credentials = Credentials {
        username: request.username,
        password: request.password,
    };

    match state.connect(Some(&credentials)).await {
        Ok(()) => {
            info!(user = %credentials.username, "login succeeded");
            Json(true)
        }
        Err(e) => {
            warn!(user = %credentials.username, error = %e, "login failed");
            Json(false)
        }
    }
}

/// Logout handler.
///
/// GET /api/logout
async fn logout(State(state): State<AppState>) -> Json<bool> {
    Json(state.disconnect().await)
}

/// Create the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/login", post(login))
        .route("/api/logout", get(logout))
}
