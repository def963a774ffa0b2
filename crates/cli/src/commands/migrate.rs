//! Schema setup.
//!
//! ```bash
//! catalog-cli migrate
//! ```
//!
//! Migrations live in `crates/catalog/migrations/` and are embedded in the
//! binary; already applied migrations are skipped.

use product_catalog::db;

use super::{CommandError, connect};

/// Ensure the `catalog` schema exists.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    let result = db::init_db(&pool).await;
    pool.close().await;
    result?;

    tracing::info!("Catalog migrations complete!");
    Ok(())
}
