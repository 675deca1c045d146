//! Livestock routes: listing, filtering, mutations and per-animal reports.

use axum::extract::{Path, Query, State};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tracing::warn;

use crate::error::{AppError, AppResult};
use crate::filter::{LivestockFilter, Tristate, deserialize_wildcard};
use crate::models::{
    AnimalCount, AnimalType, CropType, Livestock, LivestockUpdate, ResourcesSpent, VetRecord,
    WateredAndFed,
};
use crate::state::AppState;

/// Livestock filter request body.
///
/// The age range is required. `animalType` and `diet` accept `"ALL"`;
/// `harvestable` is `"true"`, `"false"` or anything else for no filter. The
/// tag range applies only when both bounds are present, and a negative
/// minimum spent amount disables that filter.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LivestockFilterRequest {
    #[serde(default)]
    pub harvestable: Tristate,
    #[serde(default, deserialize_with = "deserialize_wildcard")]
    pub animal_type: Option<AnimalType>,
    #[serde(default, deserialize_with = "deserialize_wildcard")]
    pub diet: Option<CropType>,
    pub min_age: i32,
    pub max_age: i32,
    #[serde(default, rename = "minTagID")]
    pub min_tag_id: Option<i32>,
    #[serde(default, rename = "maxTagID")]
    pub max_tag_id: Option<i32>,
    #[serde(default)]
    pub min_water_spent: Option<i64>,
    #[serde(default)]
    pub min_food_spent: Option<i64>,
}

impl From<LivestockFilterRequest> for LivestockFilter {
    fn from(request: LivestockFilterRequest) -> Self {
        let mut filter = LivestockFilter::new(
            request.harvestable,
            request.animal_type,
            request.diet,
            request.min_age,
            request.max_age,
        );
        if let (Some(min), Some(max)) = (request.min_tag_id, request.max_tag_id) {
            filter = filter.with_tag_range(min, max);
        }
        if let Some(amount) = request.min_water_spent.filter(|a| *a >= 0) {
            filter = filter.with_min_water_spent(amount);
        }
        if let Some(amount) = request.min_food_spent.filter(|a| *a >= 0) {
            filter = filter.with_min_food_spent(amount);
        }
        filter
    }
}

#[derive(Debug, Deserialize)]
pub struct CountParams {
    /// Only count animals at least this old.
    pub age: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WateredAndFedParams {
    pub animal_type: AnimalType,
    #[serde(default)]
    pub water: i64,
    #[serde(default)]
    pub food: i64,
}

/// List all livestock.
///
/// GET /api/livestock
async fn list_livestock(State(state): State<AppState>) -> AppResult<Json<Vec<Livestock>>> {
    let pool = state.db()?;
    Ok(Json(Livestock::list(&pool).await?))
}

/// List livestock matching a filter.
///
/// POST /api/livestock/filter
async fn filter_livestock(
    State(state): State<AppState>,
    Json(request): Json<LivestockFilterRequest>,
) -> AppResult<Json<Vec<Livestock>>> {
    let pool = state.db()?;
    let filter = LivestockFilter::from(request);
    Ok(Json(Livestock::list_filtered(&pool, &filter).await?))
}

/// Insert an animal. Answers false when the row could not be written.
///
/// POST /api/livestock/insert
async fn insert_livestock(
    State(state): State<AppState>,
    Json(livestock): Json<Livestock>,
) -> AppResult<Json<bool>> {
    let pool = state.db()?;
    match Livestock::create(&pool, &livestock).await {
        Ok(()) => Ok(Json(true)),
        Err(e) => {
            warn!(tag_id = livestock.tag_id, error = %e, "livestock insert rejected");
            Ok(Json(false))
        }
    }
}

/// Feed or harvest an animal.
///
/// POST /api/livestock/update
async fn update_livestock(
    State(state): State<AppState>,
    Json(update): Json<LivestockUpdate>,
) -> AppResult<Json<bool>> {
    let pool = state.db()?;
    match Livestock::apply_action(&pool, &update).await {
        Ok(updated) => Ok(Json(updated)),
        Err(e) => {
            warn!(
                tag_id = update.tag_id,
                action = %update.action_type,
                error = %e,
                "livestock update rejected"
            );
            Ok(Json(false))
        }
    }
}

/// Delete an animal.
///
/// DELETE /api/livestock/{tag_id}
async fn delete_livestock(
    State(state): State<AppState>,
    Path(tag_id): Path<i32>,
) -> AppResult<Json<bool>> {
    let pool = state.db()?;
    Ok(Json(Livestock::delete(&pool, tag_id).await?))
}

/// Total food and water spent on one animal.
///
/// GET /api/livestock/{tag_id}/resources
async fn resources_spent(
    State(state): State<AppState>,
    Path(tag_id): Path<i32>,
) -> AppResult<Json<Vec<ResourcesSpent>>> {
    let pool = state.db()?;
    if Livestock::find_by_tag(&pool, tag_id).await?.is_none() {
        return Err(AppError::NotFound);
    }
    Ok(Json(vec![ResourcesSpent::for_tag(&pool, tag_id).await?]))
}

/// Vet records of one animal.
///
/// GET /api/livestock/{tag_id}/vet-records
async fn vet_records(
    State(state): State<AppState>,
    Path(tag_id): Path<i32>,
) -> AppResult<Json<Vec<VetRecord>>> {
    let pool = state.db()?;
    Ok(Json(VetRecord::list_for_tag(&pool, tag_id).await?))
}

/// Animal counts per type.
///
/// GET /api/livestock/counts?age=
async fn animal_counts(
    State(state): State<AppState>,
    Query(params): Query<CountParams>,
) -> AppResult<Json<Vec<AnimalCount>>> {
    let pool = state.db()?;
    Ok(Json(AnimalCount::by_type(&pool, params.age).await?))
}

/// Animals of a type whose water and food totals reach the given minimums.
///
/// GET /api/livestock/watered-and-fed?animalType=&water=&food=
async fn watered_and_fed(
    State(state): State<AppState>,
    Query(params): Query<WateredAndFedParams>,
) -> AppResult<Json<Vec<WateredAndFed>>> {
    let pool = state.db()?;
    let rows = WateredAndFed::list(&pool, params.animal_type, params.water, params.food).await?;
    Ok(Json(rows))
}

/// Animals heavier than the average of their type.
///
/// GET /api/livestock/overweight
async fn overweight_livestock(State(state): State<AppState>) -> AppResult<Json<Vec<Livestock>>> {
    let pool = state.db()?;
    Ok(Json(Livestock::list_overweight(&pool).await?))
}

/// Create the livestock router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/livestock", get(list_livestock))
        .route("/api/livestock/filter", post(filter_livestock))
        .route("/api/livestock/insert", post(insert_livestock))
        .route("/api/livestock/update", post(update_livestock))
        .route("/api/livestock/counts", get(animal_counts))
        .route("/api/livestock/watered-and-fed", get(watered_and_fed))
        .route("/api/livestock/overweight", get(overweight_livestock))
        .route("/api/livestock/{tag_id}", delete(delete_livestock))
        .route("/api/livestock/{tag_id}/resources", get(resources_spent))
        .route("/api/livestock/{tag_id}/vet-records", get(vet_records))
}
