//! Service banner.

use axum::Router;
use axum::routing::get;

use crate::state::AppState;

/// Text returned by the API root.
pub const BANNER: &str = "Farm Management System is running!";

async fn banner() -> &'static str {
    BANNER
}

/// Create the front router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api", get(banner))
        .route("/api/", get(banner))
}
