//! Subcommand implementations.
//!
//! Each command loads [`CatalogConfig`] from the environment, opens its own
//! pool and closes it before returning.

pub mod list;
pub mod migrate;
pub mod seed;

use sqlx::PgPool;
use thiserror::Error;

use product_catalog::{CatalogConfig, ConfigError, DataValidationError, RepositoryError, db};

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema setup or bulk operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// A product operation failed.
    #[error(transparent)]
    Validation(#[from] DataValidationError),

    /// A command-line value could not be parsed.
    #[error("Invalid argument --{0}: {1}")]
    InvalidArgument(&'static str, String),
}

/// Connect to the catalog database configured in the environment.
pub async fn connect() -> Result<PgPool, CommandError> {
    let config = CatalogConfig::from_env()?;

    tracing::info!(
        max_connections = config.database.max_connections,
        "Connecting to catalog database..."
    );
    Ok(db::create_pool(&config.database).await?)
}
