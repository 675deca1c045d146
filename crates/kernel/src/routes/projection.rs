//! Catalog and projection routes.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::models::catalog;
use crate::state::AppState;

/// Projection request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectRequest {
    pub table_name: String,
    /// Columns to keep; empty selects every column.
    #[serde(default)]
    pub columns: Vec<String>,
}

/// GET /api/tables
async fn list_tables(State(state): State<AppState>) -> AppResult<Json<Vec<String>>> {
    let pool = state.db()?;
    Ok(Json(catalog::list_tables(&pool).await?))
}

/// GET /api/tables/{table}/columns
async fn list_columns(
    State(state): State<AppState>,
    Path(table): Path<String>,
) -> AppResult<Json<Vec<String>>> {
    let pool = state.db()?;
    let columns = catalog::list_columns(&pool, &table).await?;
    if columns.is_empty() {
        return Err(AppError::NotFound);
    }
    Ok(Json(columns))
}

/// POST /api/select
async fn select(
    State(state): State<AppState>,
    Json(request): Json<SelectRequest>,
) -> AppResult<Json<Vec<serde_json::Value>>> {
    let pool = state.db()?;
    let rows = catalog::project(&pool, &request.table_name, &request.columns).await?;
    Ok(Json(rows))
}

/// Create the projection router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/tables", get(list_tables))
        .route("/api/tables/{table}/columns", get(list_columns))
        .route("/api/select", post(select))
}
