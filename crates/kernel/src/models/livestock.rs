//! Livestock model: one row per tagged animal.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use sea_query::{Expr, Order, PostgresQueryBuilder, Query};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::PgPool;

use super::enums::{ActionType, AnimalType, CropType};
use crate::db;
use crate::filter::{FilterColumn, FilterCriteria, LivestockFilter};

/// Select list shared by every livestock query. `harvestable` is stored as
/// 0/1 and read back as a boolean.
const LIVESTOCK_COLUMNS: &str = "tagID, animalType, age, diet, weight, lastFed, \
     harvestable <> 0 AS harvestable, lastViolatedForHarvestedGoods";

/// Livestock record.
///
/// Column names arrive folded to lower case, hence the explicit renames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Livestock {
    /// Ear tag number; primary key.
    #[serde(rename = "tagID")]
    #[sqlx(rename = "tagid")]
    pub tag_id: i32,

    #[sqlx(rename = "animaltype", try_from = "String")]
    pub animal_type: AnimalType,

    /// Age in years.
    pub age: i32,

    #[sqlx(try_from = "String")]
    pub diet: CropType,

    pub weight: f64,

    #[serde(default, deserialize_with = "lenient_date")]
    #[sqlx(rename = "lastfed")]
    pub last_fed: Option<NaiveDate>,

    pub harvestable: bool,

    /// Last time goods (milk, eggs, wool) were collected from the animal.
    #[serde(default, deserialize_with = "lenient_date")]
    #[sqlx(rename = "lastviolatedforharvestedgoods")]
    pub last_violated_for_harvested_goods: Option<NaiveDate>,
}

/// Input for the update endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LivestockUpdate {
    #[serde(rename = "tagID")]
    pub tag_id: i32,

    pub action_type: ActionType,

    /// New weight, recorded on feed.
    #[serde(default)]
    pub weight: Option<f64>,

    /// Feeding date; defaults to today.
    #[serde(default, deserialize_with = "lenient_date")]
    pub last_fed: Option<NaiveDate>,

    /// Harvest date; defaults to today.
    #[serde(default, deserialize_with = "lenient_date")]
    pub last_violated_for_harvested_goods: Option<NaiveDate>,

    /// Farmer doing the feeding. When present a nurture record is written.
    #[serde(default, rename = "farmerID")]
    pub farmer_id: Option<i32>,

    #[serde(default)]
    pub water_spent: Option<i32>,

    #[serde(default)]
    pub food_spent: Option<i32>,
}

/// Accept `YYYY-MM-DD`; anything unparseable becomes `None`.
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .and_then(|s| {
            let date = s.get(..10).unwrap_or(s);
            NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
        }))
}

impl Livestock {
    /// List every animal ordered by tag.
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>> {
        let livestock = sqlx::query_as::<_, Livestock>(&format!(
            "SELECT {LIVESTOCK_COLUMNS} FROM livestock ORDER BY tagID"
        ))
        .fetch_all(pool)
        .await
        .context("failed to list livestock")?;

        Ok(livestock)
    }

    /// List animals matching a filter.
    pub async fn list_filtered(pool: &PgPool, filter: &LivestockFilter) -> Result<Vec<Self>> {
        let clause = filter.where_clause();
        tracing::debug!(fragment = %clause.to_fragment(), "filtering livestock");

        let (sql, values) = Query::select()
            .expr(Expr::cust(LIVESTOCK_COLUMNS))
            .from(clause.table())
            .cond_where(clause.to_condition())
            .order_by(FilterColumn::TagId, Order::Asc)
            .build(PostgresQueryBuilder);

        let livestock = db::bind_query_as::<Livestock>(&sql, values)?
            .fetch_all(pool)
            .await
            .context("failed to filter livestock")?;

        Ok(livestock)
    }

    /// Find an animal by tag.
    pub async fn find_by_tag(pool: &PgPool, tag_id: i32) -> Result<Option<Self>> {
        let livestock = sqlx::query_as::<_, Livestock>(&format!(
            "SELECT {LIVESTOCK_COLUMNS} FROM livestock WHERE tagID = $1"
        ))
        .bind(tag_id)
        .fetch_optional(pool)
        .await
        .context("failed to fetch livestock by tag")?;

        Ok(livestock)
    }

    /// Insert a new animal.
    pub async fn create(pool: &PgPool, input: &Livestock) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO livestock
                (tagID, animalType, age, diet, weight, lastFed, harvestable, lastViolatedForHarvestedGoods)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(input.tag_id)
        .bind(input.animal_type.as_str())
        .bind(input.age)
        .bind(input.diet.as_str())
        .bind(input.weight)
        .bind(input.last_fed)
        .bind(i16::from(input.harvestable))
        .bind(input.last_violated_for_harvested_goods)
        .execute(pool)
        .await
        .context("failed to insert livestock")?;

        Ok(())
    }

    /// Apply a feed or harvest action. Returns whether the animal was updated.
    ///
    /// Harvesting only succeeds on an animal that is currently harvestable.
    pub async fn apply_action(pool: &PgPool, update: &LivestockUpdate) -> Result<bool> {
        let result = match update.action_type {
            ActionType::Feed => sqlx::query(
                r#"
                UPDATE livestock
                SET lastFed = COALESCE($2, CURRENT_DATE), weight = COALESCE($3, weight)
                WHERE tagID = $1
                "#,
            )
            .bind(update.tag_id)
            .bind(update.last_fed)
            .bind(update.weight)
            .execute(pool)
            .await
            .context("failed to feed livestock")?,
            ActionType::Harvest => sqlx::query(
                r#"
                UPDATE livestock
                SET lastViolatedForHarvestedGoods = COALESCE($2, CURRENT_DATE), harvestable = 0
                WHERE tagID = $1 AND harvestable = 1
                "#,
            )
            .bind(update.tag_id)
            .bind(update.last_violated_for_harvested_goods)
            .execute(pool)
            .await
            .context("failed to harvest livestock")?,
        };

        let updated = result.rows_affected() > 0;

        if updated
            && update.action_type == ActionType::Feed
            && let Some(farmer_id) = update.farmer_id
        {
            sqlx::query(
                r#"
                INSERT INTO nurture (farmerID, tagID, nurtureDate, waterSpent, foodSpent)
                VALUES ($1, $2, COALESCE($3, CURRENT_DATE), $4, $5)
                "#,
            )
            .bind(farmer_id)
            .bind(update.tag_id)
            .bind(update.last_fed)
            .bind(update.water_spent.unwrap_or(0))
            .bind(update.food_spent.unwrap_or(0))
            .execute(pool)
            .await
            .context("failed to record nurture")?;
        }

        Ok(updated)
    }

    /// Delete an animal. Nurture and vet records go with it.
    pub async fn delete(pool: &PgPool, tag_id: i32) -> Result<bool> {
        let result = sqlx::query("DELETE FROM livestock WHERE tagID = $1")
            .bind(tag_id)
            .execute(pool)
            .await
            .context("failed to delete livestock")?;

        Ok(result.rows_affected() > 0)
    }

    /// Animals heavier than the average of their own type.
    pub async fn list_overweight(pool: &PgPool) -> Result<Vec<Self>> {
        let livestock = sqlx::query_as::<_, Livestock>(&format!(
            r#"
            SELECT {LIVESTOCK_COLUMNS}
            FROM livestock l
            WHERE l.weight > (
                SELECT AVG(l2.weight) FROM livestock l2 WHERE l2.animalType = l.animalType
            )
            ORDER BY l.tagID
            "#
        ))
        .fetch_all(pool)
        .await
        .context("failed to list overweight livestock")?;

        Ok(livestock)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_wire_names() {
        let json = r#"{
            "tagID": 4100,
            "animalType": "COW",
            "age": 3,
            "diet": "corn",
            "weight": 512.5,
            "lastFed": "2024-03-01",
            "harvestable": true,
            "lastViolatedForHarvestedGoods": "not a date"
        }"#;
        let livestock: Livestock = serde_json::from_str(json).unwrap();

        assert_eq!(livestock.tag_id, 4100);
        assert_eq!(livestock.animal_type, AnimalType::Cow);
        assert_eq!(livestock.diet, CropType::Corn);
        assert_eq!(livestock.last_fed, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert!(livestock.harvestable);
        assert_eq!(livestock.last_violated_for_harvested_goods, None);
    }

    #[test]
    fn missing_dates_are_none() {
        let json = r#"{"tagID": 1, "animalType": "pig", "age": 1, "diet": "wheat",
                       "weight": 40.0, "harvestable": false}"#;
        let livestock: Livestock = serde_json::from_str(json).unwrap();
        assert_eq!(livestock.last_fed, None);
    }

    #[test]
    fn timestamp_strings_keep_the_date() {
        let json = r#"{"tagID": 2, "actionType": "FEED", "lastFed": "2024-05-06T10:00:00Z"}"#;
        let update: LivestockUpdate = serde_json::from_str(json).unwrap();
        assert_eq!(update.action_type, ActionType::Feed);
        assert_eq!(update.last_fed, NaiveDate::from_ymd_opt(2024, 5, 6));
        assert_eq!(update.farmer_id, None);
    }

    #[test]
    fn serializes_wire_names() {
        let livestock = Livestock {
            tag_id: 7,
            animal_type: AnimalType::Sheep,
            age: 2,
            diet: CropType::Canola,
            weight: 50.0,
            last_fed: None,
            harvestable: false,
            last_violated_for_harvested_goods: NaiveDate::from_ymd_opt(2024, 1, 2),
        };
        let value = serde_json::to_value(&livestock).unwrap();

        assert_eq!(value["tagID"], 7);
        assert_eq!(value["animalType"], "sheep");
        assert_eq!(value["lastFed"], serde_json::Value::Null);
        assert_eq!(value["lastViolatedForHarvestedGoods"], "2024-01-02");
    }
}
