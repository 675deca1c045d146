//! Configuration loaded from environment variables.

use std::env;

use anyhow::{Context, Result};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port (default: 8080).
    pub port: u16,

    /// PostgreSQL connection URL. Credentials in the URL are replaced by the
    /// ones supplied at login.
    pub database_url: String,

    /// Maximum database connections in pool (default: 5).
    pub database_max_connections: u32,

    /// Open a connection with the URL's own credentials at startup instead of
    /// waiting for a login (default: false).
    pub connect_on_startup: bool,

    /// Apply embedded migrations whenever a connection is opened (default: true).
    pub run_migrations: bool,

    /// CORS allowed origins (comma-separated, default: "http://localhost:8080").
    pub cors_allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .context("PORT must be a valid u16")?;

        let database_url =
            env::var("DATABASE_URL").context("DATABASE_URL environment variable is required")?;

        let database_max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .context("DATABASE_MAX_CONNECTIONS must be a valid u32")?;

        let connect_on_startup = env::var("DATABASE_CONNECT_ON_STARTUP")
            .map(|v| parse_flag(&v))
            .unwrap_or(false);

        let run_migrations = env::var("RUN_MIGRATIONS")
            .map(|v| parse_flag(&v))
            .unwrap_or(true);

        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .map(|v| parse_list(&v))
            .unwrap_or_else(|_| vec!["http://localhost:8080".to_string()]);

        Ok(Self {
            port,
            database_url,
            database_max_connections,
            connect_on_startup,
            run_migrations,
            cors_allowed_origins,
        })
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags() {
        assert!(parse_flag("true"));
        assert!(parse_flag(" YES "));
        assert!(parse_flag("1"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag(""));
    }

    #[test]
    fn origin_list_drops_blanks() {
        assert_eq!(
            parse_list("http://a.test, ,http://b.test,"),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
    }
}
