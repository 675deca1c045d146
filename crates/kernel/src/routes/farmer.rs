//! Farmer routes.

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use crate::error::AppResult;
use crate::models::{Farmer, NurtureCount};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DivisionParams {
    /// Minimum animal age that must have been nurtured.
    #[serde(default)]
    pub age: i32,
}

/// GET /api/farmers
async fn list_farmers(State(state): State<AppState>) -> AppResult<Json<Vec<Farmer>>> {
    let pool = state.db()?;
    Ok(Json(Farmer::list(&pool).await?))
}

/// Farmers holding the most nurture records.
///
/// GET /api/farmers/top-nurturers
async fn top_nurturers(State(state): State<AppState>) -> AppResult<Json<Vec<NurtureCount>>> {
    let pool = state.db()?;
    Ok(Json(NurtureCount::top(&pool).await?))
}

/// Farmers who nurtured every animal at least `age` years old.
///
/// GET /api/farmers/division?age=
async fn division(
    State(state): State<AppState>,
    Query(params): Query<DivisionParams>,
) -> AppResult<Json<Vec<Farmer>>> {
    let pool = state.db()?;
    Ok(Json(Farmer::nurturing_all(&pool, params.age).await?))
}

/// Create the farmer router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/farmers", get(list_farmers))
        .route("/api/farmers/top-nurturers", get(top_nurturers))
        .route("/api/farmers/division", get(division))
}
