//! Persistence backends for products.
//!
//! # Database: `catalog` schema in `PostgreSQL`
//!
//! ## Tables
//!
//! - `catalog.products` - One row per persisted [`Product`]
//!
//! ## Types
//!
//! - `catalog.product_category` - Enum mirroring [`Category`]
//!
//! # Backends
//!
//! Record operations go through the [`ProductStore`] trait so the same
//! lifecycle rules apply whatever holds the rows:
//!
//! - [`PgProductStore`] - `PostgreSQL` via a borrowed [`PgPool`]
//! - [`InMemoryProductStore`] - process-local map with the same constraints
//!
//! # Migrations
//!
//! Migrations are stored in `crates/catalog/migrations/`, embedded at build
//! time and run via [`init_db`]:
//! ```bash
//! cargo run -p product-catalog-cli -- migrate
//! ```

pub mod memory;
pub mod products;

use async_trait::async_trait;
use rust_decimal::Decimal;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use product_catalog_core::{Category, ProductId};

use crate::config::DatabaseConfig;
use crate::models::Product;

pub use memory::InMemoryProductStore;
pub use products::PgProductStore;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failed.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., negative price).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// A row operation needs an identifier the product does not have.
    #[error("product has no identifier")]
    MissingId,
}

/// Single-field equality predicate understood by every [`ProductStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductFilter {
    /// `name = ?`
    Name(String),
    /// `available = ?`
    Available(bool),
    /// `category = ?`
    Category(Category),
    /// `price = ?`
    Price(Decimal),
}

impl ProductFilter {
    /// Whether `product` satisfies this predicate.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Self::Name(name) => product.name == *name,
            Self::Available(available) => product.available == *available,
            Self::Category(category) => product.category == *category,
            Self::Price(price) => product.price == *price,
        }
    }
}

/// Storage operations the product record relies on.
///
/// Implementations own no lifecycle rules: identifier checks and error
/// wrapping live in [`Product`]. A store only has to persist rows and report
/// failures as [`RepositoryError`].
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Persist a new row and return the identifier assigned to it.
    ///
    /// The product's own identifier is ignored.
    async fn insert(&self, product: &Product) -> Result<ProductId, RepositoryError>;

    /// Overwrite the stored row with the product's current field values.
    ///
    /// Returns [`RepositoryError::NotFound`] if no row has the product's id.
    async fn commit(&self, product: &Product) -> Result<(), RepositoryError>;

    /// Remove the row with the given identifier.
    ///
    /// Returns [`RepositoryError::NotFound`] if no row has that id.
    async fn delete(&self, id: ProductId) -> Result<(), RepositoryError>;

    /// Fetch a single row by identifier.
    async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError>;

    /// Fetch every row matching `filter`.
    async fn query(&self, filter: &ProductFilter) -> Result<Vec<Product>, RepositoryError>;

    /// Count the rows matching `filter`.
    async fn count(&self, filter: &ProductFilter) -> Result<u64, RepositoryError>;

    /// Fetch every row.
    async fn all(&self) -> Result<Vec<Product>, RepositoryError>;
}

/// Create a `PostgreSQL` connection pool from configuration.
///
/// The returned pool is the persistence context for the process: create it
/// once at startup, pass it by reference, and `close()` it on shutdown.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect(config.url.expose_secret())
        .await
}

/// Ensure the catalog schema exists by running the embedded migrations.
///
/// Safe to call on every startup; applied migrations are skipped.
///
/// # Errors
///
/// Returns `RepositoryError::Migration` if a migration fails to apply.
pub async fn init_db(pool: &PgPool) -> Result<(), RepositoryError> {
    tracing::info!("Running catalog migrations");
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("Catalog schema ready");
    Ok(())
}
