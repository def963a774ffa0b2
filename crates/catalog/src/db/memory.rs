//! Process-local product storage.
//!
//! Applies the same row constraints as the `catalog.products` table so the
//! record layer sees the same failures it would see from `PostgreSQL`.

use std::collections::BTreeMap;

use async_trait::async_trait;
use rust_decimal::{Decimal, RoundingStrategy};
use tokio::sync::RwLock;
use tracing::debug;

use product_catalog_core::ProductId;

use super::{ProductFilter, ProductStore, RepositoryError};
use crate::models::Product;

/// Scale of the `price` column (`NUMERIC(10, 2)`).
const PRICE_SCALE: u32 = 2;

/// Eight integer digits fit in `NUMERIC(10, 2)`.
const PRICE_LIMIT: i64 = 100_000_000;

/// `VARCHAR(100)`
const NAME_MAX_CHARS: usize = 100;

/// `VARCHAR(250)`
const DESCRIPTION_MAX_CHARS: usize = 250;

#[derive(Debug)]
struct Rows {
    by_id: BTreeMap<ProductId, Product>,
    next_id: i32,
}

impl Default for Rows {
    fn default() -> Self {
        Self {
            by_id: BTreeMap::new(),
            next_id: 1,
        }
    }
}

/// Product store holding rows in memory, keyed and ordered by id.
///
/// Identifiers come from a monotonic sequence and are never reused, even
/// after a delete.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    rows: RwLock<Rows>,
}

impl InMemoryProductStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows.
    pub async fn len(&self) -> usize {
        self.rows.read().await.by_id.len()
    }

    /// Whether the store holds no rows.
    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.by_id.is_empty()
    }
}

/// Enforce the table's CHECK constraints, column lengths and precision.
///
/// `VARCHAR` lengths count characters. `NUMERIC` rounds half away from zero
/// before the precision check.
fn to_row(product: &Product, id: ProductId) -> Result<Product, RepositoryError> {
    if product.name.is_empty() {
        return Err(RepositoryError::Conflict(
            "name must not be empty".to_string(),
        ));
    }
    if product.price < Decimal::ZERO {
        return Err(RepositoryError::Conflict(
            "price must not be negative".to_string(),
        ));
    }

    if product.name.chars().count() > NAME_MAX_CHARS {
        return Err(RepositoryError::Conflict(format!(
            "name must be at most {NAME_MAX_CHARS} characters"
        )));
    }
    if product.description.chars().count() > DESCRIPTION_MAX_CHARS {
        return Err(RepositoryError::Conflict(format!(
            "description must be at most {DESCRIPTION_MAX_CHARS} characters"
        )));
    }

    let price = product
        .price
        .round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero);
    if price.abs() >= Decimal::from(PRICE_LIMIT) {
        return Err(RepositoryError::Conflict(
            "price exceeds NUMERIC(10, 2)".to_string(),
        ));
    }

    let mut row = product.clone().with_id(id);
    row.price = price;
    Ok(row)
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn insert(&self, product: &Product) -> Result<ProductId, RepositoryError> {
        let mut rows = self.rows.write().await;
        let id = ProductId::new(rows.next_id);
        let row = to_row(product, id)?;

        rows.next_id += 1;
        rows.by_id.insert(id, row);
        debug!(%id, size = rows.by_id.len(), "Inserted product row");
        Ok(id)
    }

    async fn commit(&self, product: &Product) -> Result<(), RepositoryError> {
        let id = product.id().ok_or(RepositoryError::MissingId)?;
        let row = to_row(product, id)?;

        let mut rows = self.rows.write().await;
        let slot = rows.by_id.get_mut(&id).ok_or(RepositoryError::NotFound)?;
        *slot = row;
        Ok(())
    }

    async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        let mut rows = self.rows.write().await;
        rows.by_id.remove(&id).ok_or(RepositoryError::NotFound)?;
        debug!(%id, size = rows.by_id.len(), "Deleted product row");
        Ok(())
    }

    async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        Ok(self.rows.read().await.by_id.get(&id).cloned())
    }

    async fn query(&self, filter: &ProductFilter) -> Result<Vec<Product>, RepositoryError> {
        let rows = self.rows.read().await;
        Ok(rows
            .by_id
            .values()
            .filter(|product| filter.matches(product))
            .cloned()
            .collect())
    }

    async fn count(&self, filter: &ProductFilter) -> Result<u64, RepositoryError> {
        let rows = self.rows.read().await;
        let count = rows
            .by_id
            .values()
            .filter(|product| filter.matches(product))
            .count();
        u64::try_from(count).map_err(|e| RepositoryError::DataCorruption(e.to_string()))
    }

    async fn all(&self) -> Result<Vec<Product>, RepositoryError> {
        Ok(self.rows.read().await.by_id.values().cloned().collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use product_catalog_core::Category;

    use super::*;

    fn hat(price: Decimal) -> Product {
        Product::new("Fedora", "A red hat", price, true, Category::Cloths)
    }

    #[tokio::test]
    async fn test_insert_assigns_increasing_ids() {
        let store = InMemoryProductStore::new();

        let first = store.insert(&hat(Decimal::new(1250, 2))).await.unwrap();
        let second = store.insert(&hat(Decimal::new(1250, 2))).await.unwrap();

        assert_eq!(first, ProductId::new(1));
        assert_eq!(second, ProductId::new(2));
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let store = InMemoryProductStore::new();
        let id = store.insert(&hat(Decimal::ONE)).await.unwrap();
        store.delete(id).await.unwrap();

        let next = store.insert(&hat(Decimal::ONE)).await.unwrap();
        assert_ne!(id, next);
        assert!(store.get(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_rejects_negative_price() {
        let store = InMemoryProductStore::new();
        let err = store.insert(&hat(Decimal::new(-1, 2))).await.unwrap_err();

        assert!(matches!(err, RepositoryError::Conflict(_)));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_rejects_empty_name() {
        let store = InMemoryProductStore::new();
        let product = Product::new("", "nameless", Decimal::ONE, true, Category::Tools);

        let err = store.insert(&product).await.unwrap_err();
        assert_eq!(err.to_string(), "constraint violation: name must not be empty");
    }

    #[tokio::test]
    async fn test_rejects_values_wider_than_columns() {
        let store = InMemoryProductStore::new();

        let long_name = Product::new("x".repeat(101), "", Decimal::ONE, true, Category::Tools);
        assert_eq!(
            store.insert(&long_name).await.unwrap_err().to_string(),
            "constraint violation: name must be at most 100 characters"
        );

        let long_description =
            Product::new("Hat", "d".repeat(251), Decimal::ONE, true, Category::Cloths);
        assert!(matches!(
            store.insert(&long_description).await,
            Err(RepositoryError::Conflict(_))
        ));

        let too_expensive = hat(Decimal::new(100_000_000_000, 2));
        assert!(matches!(
            store.insert(&too_expensive).await,
            Err(RepositoryError::Conflict(_))
        ));

        // Rounds up past the limit.
        assert!(matches!(
            store.insert(&hat(Decimal::new(99_999_999_995, 3))).await,
            Err(RepositoryError::Conflict(_))
        ));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_accepts_values_at_column_limits() {
        let store = InMemoryProductStore::new();
        let product = Product::new(
            "é".repeat(100),
            "d".repeat(250),
            Decimal::new(9_999_999_999, 2),
            true,
            Category::Tools,
        );

        let id = store.insert(&product).await.unwrap();
        let stored = store.get(id).await.unwrap().unwrap();
        assert_eq!(stored.name.chars().count(), 100);
        assert_eq!(stored.price, Decimal::new(9_999_999_999, 2));
    }

    #[tokio::test]
    async fn test_price_is_stored_at_column_scale() {
        let store = InMemoryProductStore::new();
        let id = store.insert(&hat(Decimal::new(12_345, 3))).await.unwrap();

        let stored = store.get(id).await.unwrap().unwrap();
        assert_eq!(stored.price, Decimal::new(1235, 2));
    }

    #[tokio::test]
    async fn test_commit_and_delete_unknown_id() {
        let store = InMemoryProductStore::new();
        let ghost = hat(Decimal::ONE).with_id(ProductId::new(99));

        assert!(matches!(
            store.commit(&ghost).await,
            Err(RepositoryError::NotFound)
        ));
        assert!(matches!(
            store.delete(ProductId::new(99)).await,
            Err(RepositoryError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_commit_requires_id() {
        let store = InMemoryProductStore::new();
        assert!(matches!(
            store.commit(&hat(Decimal::ONE)).await,
            Err(RepositoryError::MissingId)
        ));
    }

    #[tokio::test]
    async fn test_query_and_count_use_filter() {
        let store = InMemoryProductStore::new();
        store.insert(&hat(Decimal::ONE)).await.unwrap();
        store
            .insert(&Product::new(
                "Apple",
                "Crunchy",
                Decimal::ONE,
                false,
                Category::Food,
            ))
            .await
            .unwrap();

        let food = ProductFilter::Category(Category::Food);
        let found = store.query(&food).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Apple");
        assert_eq!(store.count(&food).await.unwrap(), 1);
        assert_eq!(
            store.count(&ProductFilter::Available(true)).await.unwrap(),
            1
        );
        assert_eq!(store.all().await.unwrap().len(), 2);
    }
}
