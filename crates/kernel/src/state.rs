//! Application state shared across all handlers.

use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::PgPool;
use tracing::info;

use crate::config::Config;
use crate::db::{self, Credentials};
use crate::error::{AppError, AppResult};

/// Shared application state.
///
/// Wrapped in Arc internally so Clone is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,

    /// Connection pool opened by the last successful login.
    ///
    /// The lock is only taken to clone, swap or take the pool and is never
    /// held across an await point.
    db: parking_lot::RwLock<Option<PgPool>>,
}

impl AppState {
    /// Create new application state.
    ///
    /// No connection is opened unless `connect_on_startup` is set; otherwise
    /// the first login opens one.
    pub async fn new(config: &Config) -> Result<Self> {
        let state = Self {
            inner: Arc::new(AppStateInner {
                config: config.clone(),
                db: parking_lot::RwLock::new(None),
            }),
        };

        if config.connect_on_startup {
            state
                .connect(None)
                .await
                .context("failed to connect on startup")?;
        }

        Ok(state)
    }

    /// Get the open connection pool, or `Unauthorized` when nobody is logged in.
    pub fn db(&self) -> AppResult<PgPool> {
        self.inner.db.read().clone().ok_or(AppError::Unauthorized)
    }

    /// Whether a connection pool is currently open.
    pub fn is_connected(&self) -> bool {
        self.inner.db.read().is_some()
    }

    /// Open a pool with the given credentials and make it current.
    ///
    /// A previously open pool is closed after the swap.
    pub async fn connect(&self, credentials: Option<&Credentials>) -> Result<()> {
        let pool = db::create_pool(&self.inner.config, credentials).await?;

        if self.inner.config.run_migrations {
            db::run_migrations(&pool).await?;
        }

        let previous = self.inner.db.write().replace(pool);
        if let Some(previous) = previous {
            previous.close().await;
        }

        info!(
            user = credentials.map(|c| c.username.as_str()).unwrap_or("<url>"),
            "database connection opened"
        );
        Ok(())
    }

    /// Close the current pool. Returns false when no pool was open.
    pub async fn disconnect(&self) -> bool {
        let pool = self.inner.db.write().take();
        let Some(pool) = pool else {
            return false;
        };

        pool.close().await;
        info!("database connection closed");
        true
    }

    /// Check if the database is reachable through the current pool.
    pub async fn database_healthy(&self) -> bool {
        let pool = self.inner.db.read().clone();
        match pool {
            Some(pool) => db::check_health(&pool).await,
            None => false,
        }
    }
}
