//! Product Catalog - record validation, serialization and persistence.
//!
//! A single-entity data-access layer. A [`Product`] is built in memory or
//! populated from a loose JSON mapping with [`Product::deserialize`], then
//! persisted through a [`ProductStore`]:
//!
//! ```rust,ignore
//! use product_catalog::{CatalogConfig, PgProductStore, Product, db};
//!
//! let config = CatalogConfig::from_env()?;
//! let pool = db::create_pool(&config.database).await?;
//! db::init_db(&pool).await?;
//! let store = PgProductStore::new(&pool);
//!
//! let mut product = Product::default();
//! product.deserialize(&body)?;
//! product.create(&store).await?;
//!
//! let hats = Product::find_by_name("Fedora").all(&store).await?;
//! pool.close().await;
//! ```
//!
//! # Modules
//!
//! - [`config`] - Environment configuration
//! - [`db`] - Store trait, `PostgreSQL` and in-memory backends, bootstrap
//! - [`error`] - [`DataValidationError`]
//! - [`models`] - [`Product`] and [`ProductQuery`]
//! - `fixtures` - Random product factory (feature `fixtures`)

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
#[cfg(feature = "fixtures")]
pub mod fixtures;
pub mod models;

pub use config::{CatalogConfig, ConfigError, DatabaseConfig};
pub use db::{InMemoryProductStore, PgProductStore, ProductFilter, ProductStore, RepositoryError};
pub use error::DataValidationError;
pub use models::{Product, ProductQuery, parse_price};
pub use product_catalog_core::{Category, CategoryError, ProductId};
