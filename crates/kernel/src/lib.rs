//! Farm management kernel library.
//!
//! This library exposes kernel internals for integration testing.
//! The main entry point for running the server is the `farm` binary.

pub mod config;
pub mod db;
pub mod error;
pub mod filter;
pub mod models;
pub mod routes;
pub mod state;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
