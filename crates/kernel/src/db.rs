//! Database connection pool management.

use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use sea_query::{Value, Values};
use sqlx::postgres::{PgArguments, PgConnectOptions, PgPool, PgPoolOptions, PgRow};
use sqlx::query::QueryAs;
use sqlx::{FromRow, Postgres};

use crate::config::Config;

/// Database account supplied at login.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Create a PostgreSQL connection pool.
///
/// When `credentials` is given it replaces any user and password embedded in
/// `DATABASE_URL`.
pub async fn create_pool(config: &Config, credentials: Option<&Credentials>) -> Result<PgPool> {
    let mut options = PgConnectOptions::from_str(&config.database_url)
        .context("DATABASE_URL is not a valid PostgreSQL URL")?;

    if let Some(credentials) = credentials {
        options = options
            .username(&credentials.username)
            .password(&credentials.password);
    }

    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(options)
        .await
        .context("failed to connect to PostgreSQL")?;

    Ok(pool)
}

/// Apply the embedded schema migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("failed to apply migrations")?;

    Ok(())
}

/// Check if the database connection is healthy.
pub async fn check_health(pool: &PgPool) -> bool {
    sqlx::query("SELECT 1").execute(pool).await.is_ok()
}

/// Bind the values of a SeaQuery statement built with
/// `build(PostgresQueryBuilder)` onto a typed sqlx query.
pub fn bind_query_as<'q, O>(
    sql: &'q str,
    values: Values,
) -> Result<QueryAs<'q, Postgres, O, PgArguments>>
where
    O: for<'r> FromRow<'r, PgRow>,
{
    let mut query = sqlx::query_as::<_, O>(sql);
    for value in values.0 {
        query = match value {
            Value::Bool(v) => query.bind(v),
            Value::SmallInt(v) => query.bind(v),
            Value::Int(v) => query.bind(v),
            Value::BigInt(v) => query.bind(v),
            Value::Double(v) => query.bind(v),
            Value::String(v) => query.bind(v.map(|s| *s)),
            other => bail!("unsupported query parameter: {other:?}"),
        };
    }
    Ok(query)
}
