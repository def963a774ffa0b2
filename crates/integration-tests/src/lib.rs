//! Integration tests for the product catalog.
//!
//! # Running Tests
//!
//! ```bash
//! # In-memory store scenarios (no services needed)
//! cargo test -p product-catalog-integration-tests
//!
//! # PostgreSQL scenarios
//! export CATALOG_DATABASE_URL=postgres://localhost/catalog_test
//! cargo test -p product-catalog-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `products_in_memory` - Record lifecycle against [`InMemoryProductStore`]
//! - `products_postgres` - The same scenarios against `PostgreSQL`
//!
//! [`InMemoryProductStore`]: product_catalog::InMemoryProductStore

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod scenarios;

use sqlx::PgPool;
use tokio::sync::{Mutex, MutexGuard};

use product_catalog::{CatalogConfig, PgProductStore, db};

/// Serializes tests that share the `catalog.products` table.
static DATABASE_LOCK: Mutex<()> = Mutex::const_new(());

/// An empty, migrated catalog database held exclusively by one test.
pub struct TestDatabase {
    pub pool: PgPool,
    _guard: MutexGuard<'static, ()>,
}

impl TestDatabase {
    /// Connect using `CATALOG_DATABASE_URL`, run migrations and clear the
    /// products table.
    ///
    /// # Panics
    ///
    /// Panics if the database is not configured or unreachable.
    #[allow(clippy::expect_used)]
    pub async fn acquire() -> Self {
        let guard = DATABASE_LOCK.lock().await;

        let config = CatalogConfig::from_env().expect("CATALOG_DATABASE_URL must be set");
        let pool = db::create_pool(&config.database)
            .await
            .expect("Failed to connect to test database");
        db::init_db(&pool).await.expect("Failed to run migrations");
        PgProductStore::new(&pool)
            .delete_all()
            .await
            .expect("Failed to clear products");

        Self {
            pool,
            _guard: guard,
        }
    }

    /// A store over this database's pool.
    #[must_use]
    pub const fn store(&self) -> PgProductStore<'_> {
        PgProductStore::new(&self.pool)
    }

    /// Close the pool.
    pub async fn close(self) {
        self.pool.close().await;
    }
}
