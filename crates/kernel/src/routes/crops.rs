//! Crop listing routes.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

use crate::error::AppResult;
use crate::filter::{CropsFilter, deserialize_wildcard};
use crate::models::{Crop, CropStatus, CropType, CropVariant};
use crate::state::AppState;

/// Crops filter request body. `"ALL"` or an absent field disables the
/// corresponding equality filter; the quantity range is required.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropsFilterRequest {
    #[serde(default, deserialize_with = "deserialize_wildcard")]
    pub crop_type: Option<CropType>,
    #[serde(default, deserialize_with = "deserialize_wildcard")]
    pub crop_variant: Option<CropVariant>,
    #[serde(default, deserialize_with = "deserialize_wildcard")]
    pub crop_status: Option<CropStatus>,
    pub min_quantity: i32,
    pub max_quantity: i32,
}

impl From<CropsFilterRequest> for CropsFilter {
    fn from(request: CropsFilterRequest) -> Self {
        CropsFilter::new(
            request.crop_type,
            request.crop_variant,
            request.crop_status,
            request.min_quantity,
            request.max_quantity,
        )
    }
}

/// List all crops.
///
/// GET /api/crops
async fn list_crops(State(state): State<AppState>) -> AppResult<Json<Vec<Crop>>> {
    let pool = state.db()?;
    Ok(Json(Crop::list(&pool).await?))
}

/// List crops matching a filter.
///
/// POST /api/crops/filter
async fn filter_crops(
    State(state): State<AppState>,
    Json(request): Json<CropsFilterRequest>,
) -> AppResult<Json<Vec<Crop>>> {
    let pool = state.db()?;
    let filter = CropsFilter::from(request);
    Ok(Json(Crop::list_filtered(&pool, &filter).await?))
}

/// Create the crops router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/crops", get(list_crops))
        .route("/api/crops/filter", post(filter_crops))
}
