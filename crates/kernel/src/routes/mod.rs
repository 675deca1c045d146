//! HTTP route handlers.

pub mod auth;
pub mod crops;
pub mod farmer;
pub mod front;
pub mod health;
pub mod livestock;
pub mod projection;

use axum::Router;

use crate::state::AppState;

/// All kernel routes, without middleware layers.
///
/// The binary and the integration tests both build on this so they serve the
/// same surface.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(front::router())
        .merge(health::router())
        .merge(auth::router())
        .merge(livestock::router())
        .merge(crops::router())
        .merge(farmer::router())
        .merge(projection::router())
}
