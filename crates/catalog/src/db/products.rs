//! `PostgreSQL` storage for products.
//!
//! Queries are assembled at runtime with [`QueryBuilder`] instead of the
//! `query!` macros, so the crate builds without a live database.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::error::ErrorKind;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::{debug, instrument};

use product_catalog_core::{Category, ProductId};

use super::{ProductFilter, ProductStore, RepositoryError};
use crate::models::Product;

const SELECT_PRODUCTS: &str = r"
    SELECT id, name, description, price, available, category
    FROM catalog.products
";

/// SQLSTATE `string_data_right_truncation` (value longer than the column).
const STRING_TOO_LONG: &str = "22001";

/// SQLSTATE `numeric_value_out_of_range` (price beyond `NUMERIC(10, 2)`).
const NUMERIC_OUT_OF_RANGE: &str = "22003";

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for product queries.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: ProductId,
    name: String,
    description: String,
    price: Decimal,
    available: bool,
    category: Category,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self::new(
            row.name,
            row.description,
            row.price,
            row.available,
            row.category,
        )
        .with_id(row.id)
    }
}

/// Map constraint failures to [`RepositoryError::Conflict`], everything else
/// to [`RepositoryError::Database`].
fn classify(err: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(db_err) = &err {
        let too_wide = matches!(
            db_err.code().as_deref(),
            Some(STRING_TOO_LONG | NUMERIC_OUT_OF_RANGE)
        );
        if too_wide
            || matches!(
                db_err.kind(),
                ErrorKind::CheckViolation | ErrorKind::NotNullViolation | ErrorKind::UniqueViolation
            )
        {
            return RepositoryError::Conflict(db_err.message().to_owned());
        }
    }
    RepositoryError::Database(err)
}

fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &ProductFilter) {
    builder.push(" WHERE ");
    match filter {
        ProductFilter::Name(name) => builder.push("name = ").push_bind(name.clone()),
        ProductFilter::Available(available) => {
            builder.push("available = ").push_bind(*available)
        }
        ProductFilter::Category(category) => builder.push("category = ").push_bind(*category),
        ProductFilter::Price(price) => builder.push("price = ").push_bind(*price),
    };
}

// =============================================================================
// Repository
// =============================================================================

/// Product store backed by the `catalog.products` table.
///
/// Borrows the pool; whoever created the pool closes it.
#[derive(Debug, Clone, Copy)]
pub struct PgProductStore<'a> {
    pool: &'a PgPool,
}

impl<'a> PgProductStore<'a> {
    /// Create a new product store over an existing pool.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Delete every product row.
    ///
    /// Returns the number of rows removed. Used to reset state between test
    /// runs.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn delete_all(&self) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM catalog.products")
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl ProductStore for PgProductStore<'_> {
    #[instrument(skip(self, product), fields(name = %product.name))]
    async fn insert(&self, product: &Product) -> Result<ProductId, RepositoryError> {
        let id = sqlx::query_scalar::<_, ProductId>(
            r"
            INSERT INTO catalog.products (name, description, price, available, category)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            ",
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.available)
        .bind(product.category)
        .fetch_one(self.pool)
        .await
        .map_err(classify)?;

        debug!(%id, "Inserted product row");
        Ok(id)
    }

    #[instrument(skip(self, product), fields(id = ?product.id()))]
    async fn commit(&self, product: &Product) -> Result<(), RepositoryError> {
        let id = product.id().ok_or(RepositoryError::MissingId)?;

        let result = sqlx::query(
            r"
            UPDATE catalog.products
            SET name = $2, description = $3, price = $4, available = $5, category = $6
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.available)
        .bind(product.category)
        .execute(self.pool)
        .await
        .map_err(classify)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM catalog.products WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let mut builder = QueryBuilder::<Postgres>::new(SELECT_PRODUCTS);
        builder.push(" WHERE id = ").push_bind(id);

        let row = builder
            .build_query_as::<ProductRow>()
            .fetch_optional(self.pool)
            .await?;

        Ok(row.map(Into::into))
    }

    #[instrument(skip(self))]
    async fn query(&self, filter: &ProductFilter) -> Result<Vec<Product>, RepositoryError> {
        let mut builder = QueryBuilder::<Postgres>::new(SELECT_PRODUCTS);
        push_filter(&mut builder, filter);
        builder.push(" ORDER BY id");

        let rows = builder
            .build_query_as::<ProductRow>()
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: &ProductFilter) -> Result<u64, RepositoryError> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM catalog.products");
        push_filter(&mut builder, filter);

        let count = builder
            .build_query_scalar::<i64>()
            .fetch_one(self.pool)
            .await?;

        u64::try_from(count)
            .map_err(|_| RepositoryError::DataCorruption(format!("negative row count {count}")))
    }

    #[instrument(skip(self))]
    async fn all(&self) -> Result<Vec<Product>, RepositoryError> {
        let mut builder = QueryBuilder::<Postgres>::new(SELECT_PRODUCTS);
        builder.push(" ORDER BY id");

        let rows = builder
            .build_query_as::<ProductRow>()
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
