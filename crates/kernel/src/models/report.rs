//! Per-animal reports: resources, vet history and aggregate counts.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Serialize;
use sqlx::PgPool;

use super::enums::AnimalType;

/// Total food and water recorded for one animal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ResourcesSpent {
    #[sqlx(rename = "totalfoodconsumed")]
    pub total_food_consumed: i64,

    #[sqlx(rename = "totalwaterconsumed")]
    pub total_water_consumed: i64,
}

/// Vet record joined with the animal it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct VetRecord {
    #[serde(rename = "tagID")]
    #[sqlx(rename = "tagid")]
    pub tag_id: i32,

    #[sqlx(rename = "animaltype", try_from = "String")]
    pub animal_type: AnimalType,

    #[sqlx(rename = "recorddate")]
    pub record_date: NaiveDate,

    #[sqlx(rename = "healthstatus")]
    pub health_status: String,
}

/// Number of animals of one type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AnimalCount {
    #[sqlx(rename = "animaltype", try_from = "String")]
    pub animal_type: AnimalType,

    pub count: i64,
}

/// An animal's summed water and food intake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct WateredAndFed {
    #[serde(rename = "tagID")]
    #[sqlx(rename = "tagid")]
    pub tag_id: i32,

    #[sqlx(rename = "totalwater")]
    pub total_water: i64,

    #[sqlx(rename = "totalfood")]
    pub total_food: i64,
}

impl ResourcesSpent {
    /// Sum the nurture records of one animal. An animal never nurtured has
    /// zero totals.
    pub async fn for_tag(pool: &PgPool, tag_id: i32) -> Result<Self> {
        let spent = sqlx::query_as::<_, ResourcesSpent>(
            r#"
            SELECT COALESCE(SUM(foodSpent), 0)::BIGINT AS totalFoodConsumed,
                   COALESCE(SUM(waterSpent), 0)::BIGINT AS totalWaterConsumed
            FROM nurture
            WHERE tagID = $1
            "#,
        )
        .bind(tag_id)
        .fetch_one(pool)
        .await
        .context("failed to sum resources spent")?;

        Ok(spent)
    }
}

impl VetRecord {
    /// Join: vet history of one animal, newest first.
    pub async fn list_for_tag(pool: &PgPool, tag_id: i32) -> Result<Vec<Self>> {
        let records = sqlx::query_as::<_, VetRecord>(
            r#"
            SELECT l.tagID, l.animalType, v.recordDate, v.healthStatus
            FROM livestock l
            JOIN vetRecords v ON v.tagID = l.tagID
            WHERE l.tagID = $1
            ORDER BY v.recordDate DESC
            "#,
        )
        .bind(tag_id)
        .fetch_all(pool)
        .await
        .context("failed to list vet records")?;

        Ok(records)
    }
}

impl AnimalCount {
    /// Group by: count animals per type, optionally only those at least
    /// `min_age` years old.
    pub async fn by_type(pool: &PgPool, min_age: Option<i32>) -> Result<Vec<Self>> {
        let counts = sqlx::query_as::<_, AnimalCount>(
            r#"
            SELECT animalType, COUNT(*) AS count
            FROM livestock
            WHERE $1::INTEGER IS NULL OR age >= $1
            GROUP BY animalType
            ORDER BY animalType
            "#,
        )
        .bind(min_age)
        .fetch_all(pool)
        .await
        .context("failed to count livestock by type")?;

        Ok(counts)
    }
}

impl WateredAndFed {
    /// Group by with HAVING: animals of one type whose summed water and food
    /// both reach the given minimums.
    pub async fn list(
        pool: &PgPool,
        animal_type: AnimalType,
        min_water: i64,
        min_food: i64,
    ) -> Result<Vec<Self>> {
        let rows = sqlx::query_as::<_, WateredAndFed>(
            r#"
            SELECT l.tagID, SUM(n.waterSpent) AS totalWater, SUM(n.foodSpent) AS totalFood
            FROM livestock l
            JOIN nurture n ON n.tagID = l.tagID
            WHERE l.animalType = $1
            GROUP BY l.tagID
            HAVING SUM(n.waterSpent) >= $2 AND SUM(n.foodSpent) >= $3
            ORDER BY l.tagID
            "#,
        )
        .bind(animal_type.as_str())
        .bind(min_water)
        .bind(min_food)
        .fetch_all(pool)
        .await
        .context("failed to find watered and fed livestock")?;

        Ok(rows)
    }
}
