//! Seed the catalog with random products.

use tracing::info;

use product_catalog::fixtures::ProductFactory;
use product_catalog::{PgProductStore, Product};

use super::{CommandError, connect};

/// Create `count` random products.
pub async fn run(count: usize) -> Result<(), CommandError> {
    let pool = connect().await?;
    let result = insert(&pool, count).await;
    pool.close().await;
    let created = result?;

    info!(created, "Seeding complete!");
    Ok(())
}

async fn insert(pool: &sqlx::PgPool, count: usize) -> Result<usize, CommandError> {
    let store = PgProductStore::new(pool);

    let mut created = 0;
    for mut product in ProductFactory::new().batch(count) {
        let id = product.create(&store).await?;
        info!(%id, name = %product.name, "Seeded product");
        created += 1;
    }

    let total = Product::all(&store).await?.len();
    info!(total, "Products in catalog");
    Ok(created)
}
