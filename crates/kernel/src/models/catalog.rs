//! Schema catalog and ad-hoc projection over user tables.
//!
//! Table and column names come from the client, so they are resolved against
//! `information_schema` first and only the catalog's own spelling is placed
//! in the generated SQL.

use anyhow::Context;
use sea_query::{Alias, Asterisk, PostgresQueryBuilder, Query};
use sqlx::PgPool;
use thiserror::Error;

/// Projection failures.
#[derive(Debug, Error)]
pub enum ProjectionError {
    #[error("unknown table: {0}")]
    UnknownTable(String),

    #[error("unknown column {column} in table {table}")]
    UnknownColumn { table: String, column: String },

    #[error(transparent)]
    Database(#[from] anyhow::Error),
}

/// Names of the user tables in the current schema.
pub async fn list_tables(pool: &PgPool) -> anyhow::Result<Vec<String>> {
    let tables: Vec<String> = sqlx::query_scalar(
        r#"
        SELECT table_name::TEXT
        FROM information_schema.tables
        WHERE table_schema = current_schema()
          AND table_type = 'BASE TABLE'
          AND table_name NOT LIKE '\_sqlx%'
        ORDER BY table_name
        "#,
    )
    .fetch_all(pool)
    .await
    .context("failed to list tables")?;

    Ok(tables)
}

/// Column names of `table` in declaration order. Empty when the table does
/// not exist.
pub async fn list_columns(pool: &PgPool, table: &str) -> anyhow::Result<Vec<String>> {
    let columns: Vec<String> = sqlx::query_scalar(
        r#"
        SELECT column_name::TEXT
        FROM information_schema.columns
        WHERE table_schema = current_schema() AND table_name = $1
        ORDER BY ordinal_position
        "#,
    )
    .bind(fold_identifier(table))
    .fetch_all(pool)
    .await
    .context("failed to list table columns")?;

    Ok(columns)
}

/// Select `columns` (all when empty) from `table`, one JSON object per row.
pub async fn project(
    pool: &PgPool,
    table: &str,
    columns: &[String],
) -> Result<Vec<serde_json::Value>, ProjectionError> {
    let tables = list_tables(pool).await?;
    let folded = fold_identifier(table);
    let Some(table_name) = tables.into_iter().find(|t| *t == folded) else {
        return Err(ProjectionError::UnknownTable(table.to_string()));
    };

    let known = list_columns(pool, &table_name).await?;
    let selected = resolve_columns(&table_name, &known, columns)?;

    // The statement holds `Rc` identifiers; it must be gone before the await.
    let sql = {
        let mut query = Query::select();
        if selected.is_empty() {
            query.column(Asterisk);
        } else {
            for column in selected {
                query.column(Alias::new(column));
            }
        }
        query.from(Alias::new(table_name.as_str()));
        query.to_string(PostgresQueryBuilder)
    };

    let rows: Vec<serde_json::Value> =
        sqlx::query_scalar(&format!("SELECT row_to_json(t) FROM ({sql}) t"))
            .fetch_all(pool)
            .await
            .context("failed to execute projection")?;

    Ok(rows)
}

/// Map requested names onto catalog names, preserving request order.
fn resolve_columns(
    table: &str,
    known: &[String],
    requested: &[String],
) -> Result<Vec<String>, ProjectionError> {
    requested
        .iter()
        .map(|column| {
            let folded = fold_identifier(column);
            known
                .iter()
                .find(|k| **k == folded)
                .cloned()
                .ok_or_else(|| ProjectionError::UnknownColumn {
                    table: table.to_string(),
                    column: column.clone(),
                })
        })
        .collect()
}

/// Unquoted identifiers are stored lower case.
fn fold_identifier(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn known() -> Vec<String> {
        ["tagid", "animaltype", "age"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn resolves_case_insensitively_in_request_order() {
        let requested = vec!["AGE".to_string(), "tagID".to_string()];
        let resolved = resolve_columns("livestock", &known(), &requested).unwrap();
        assert_eq!(resolved, vec!["age".to_string(), "tagid".to_string()]);
    }

    #[test]
    fn rejects_unknown_column() {
        let requested = vec!["age; DROP TABLE farmer".to_string()];
        let err = resolve_columns("livestock", &known(), &requested).unwrap_err();
        assert!(matches!(err, ProjectionError::UnknownColumn { .. }));
    }

    #[test]
    fn projection_future_is_send() {
        fn assert_send<T: Send>(_: &T) {}
        fn check(pool: &PgPool, columns: &[String]) {
            let future = project(pool, "farmer", columns);
            assert_send(&future);
        }
        let _ = check;
    }

    #[test]
    fn empty_request_selects_nothing_explicitly() {
        assert!(resolve_columns("livestock", &known(), &[]).unwrap().is_empty());
    }
}
