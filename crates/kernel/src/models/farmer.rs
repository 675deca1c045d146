//! Farmer model and the farmer-centric reports.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Farmer record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Farmer {
    #[serde(rename = "farmerID")]
    #[sqlx(rename = "farmerid")]
    pub farmer_id: i32,

    pub name: String,

    #[sqlx(rename = "yearsemployed")]
    pub years_employed: i32,
}

/// A farmer together with how many nurture records they hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct NurtureCount {
    #[serde(rename = "farmerID")]
    #[sqlx(rename = "farmerid")]
    pub farmer_id: i32,

    pub name: String,

    #[sqlx(rename = "nurturecount")]
    pub nurture_count: i64,
}

impl Farmer {
    /// List all farmers.
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>> {
        let farmers = sqlx::query_as::<_, Farmer>(
            "SELECT farmerID, name, yearsEmployed FROM farmer ORDER BY farmerID",
        )
        .fetch_all(pool)
        .await
        .context("failed to list farmers")?;

        Ok(farmers)
    }

    /// Division: farmers who have nurtured every animal aged `min_age` or older.
    ///
    /// When no animal is that old every farmer qualifies.
    pub async fn nurturing_all(pool: &PgPool, min_age: i32) -> Result<Vec<Self>> {
        let farmers = sqlx::query_as::<_, Farmer>(
            r#"
            SELECT f.farmerID, f.name, f.yearsEmployed
            FROM farmer f
            WHERE NOT EXISTS (
                SELECT 1
                FROM livestock l
                WHERE l.age >= $1
                  AND NOT EXISTS (
                      SELECT 1
                      FROM nurture n
                      WHERE n.farmerID = f.farmerID AND n.tagID = l.tagID
                  )
            )
            ORDER BY f.farmerID
            "#,
        )
        .bind(min_age)
        .fetch_all(pool)
        .await
        .context("failed to run farmer division query")?;

        Ok(farmers)
    }
}

impl NurtureCount {
    /// Nested aggregation: the farmers with the highest nurture count.
    pub async fn top(pool: &PgPool) -> Result<Vec<Self>> {
        let counts = sqlx::query_as::<_, NurtureCount>(
            r#"
            SELECT f.farmerID, f.name, COUNT(*) AS nurtureCount
            FROM farmer f
            JOIN nurture n ON n.farmerID = f.farmerID
            GROUP BY f.farmerID, f.name
            HAVING COUNT(*) >= ALL (
                SELECT COUNT(*) FROM nurture GROUP BY farmerID
            )
            ORDER BY f.farmerID
            "#,
        )
        .fetch_all(pool)
        .await
        .context("failed to find top nurturing farmers")?;

        Ok(counts)
    }
}
