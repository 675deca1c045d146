//! Crop model: planted quantity per crop type and variant.

use anyhow::{Context, Result};
use sea_query::{Order, PostgresQueryBuilder, Query};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use super::enums::{CropStatus, CropType, CropVariant};
use crate::db;
use crate::filter::{CropsFilter, FilterColumn, FilterCriteria};

/// Crop record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Crop {
    #[sqlx(rename = "croptype", try_from = "String")]
    pub crop_type: CropType,

    #[sqlx(rename = "cropvariant", try_from = "String")]
    pub crop_variant: CropVariant,

    #[sqlx(rename = "cropstatus", try_from = "String")]
    pub crop_status: CropStatus,

    pub quantity: i32,
}

impl Crop {
    /// List every crop.
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>> {
        let crops = sqlx::query_as::<_, Crop>(
            "SELECT cropType, cropVariant, cropStatus, quantity FROM crops ORDER BY cropType, cropVariant",
        )
        .fetch_all(pool)
        .await
        .context("failed to list crops")?;

        Ok(crops)
    }

    /// List crops matching a filter.
    pub async fn list_filtered(pool: &PgPool, filter: &CropsFilter) -> Result<Vec<Self>> {
        let clause = filter.where_clause();
        tracing::debug!(fragment = %clause.to_fragment(), "filtering crops");

        let (sql, values) = Query::select()
            .columns([
                FilterColumn::CropType,
                FilterColumn::CropVariant,
                FilterColumn::CropStatus,
                FilterColumn::Quantity,
            ])
            .from(clause.table())
            .cond_where(clause.to_condition())
            .order_by(FilterColumn::CropType, Order::Asc)
            .order_by(FilterColumn::CropVariant, Order::Asc)
            .build(PostgresQueryBuilder);

        let crops = db::bind_query_as::<Crop>(&sql, values)?
            .fetch_all(pool)
            .await
            .context("failed to filter crops")?;

        Ok(crops)
    }
}
