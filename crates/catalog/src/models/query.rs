//! Deferred attribute lookups.

use tracing::debug;

use super::product::{Product, backend_failure};
use crate::db::{ProductFilter, ProductStore};
use crate::error::DataValidationError;

/// A lookup built by one of the `Product::find_by_*` constructors.
///
/// Nothing touches the store until the query is executed with
/// [`all`](Self::all), [`first`](Self::first) or [`count`](Self::count).
/// A query can be executed any number of times, against any store.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a query does nothing until it is executed"]
pub struct ProductQuery {
    filter: ProductFilter,
}

impl ProductQuery {
    pub(crate) const fn new(filter: ProductFilter) -> Self {
        Self { filter }
    }

    /// The predicate this query applies.
    pub const fn filter(&self) -> &ProductFilter {
        &self.filter
    }

    /// Every matching product. Callers must not rely on the order.
    ///
    /// # Errors
    ///
    /// Returns `DataValidationError` if the store query fails.
    pub async fn all<S>(&self, store: &S) -> Result<Vec<Product>, DataValidationError>
    where
        S: ProductStore + ?Sized,
    {
        debug!(filter = ?self.filter, "Running product query");
        store
            .query(&self.filter)
            .await
            .map_err(|e| backend_failure("query", e))
    }

    /// The first matching product, if any.
    ///
    /// # Errors
    ///
    /// Returns `DataValidationError` if the store query fails.
    pub async fn first<S>(&self, store: &S) -> Result<Option<Product>, DataValidationError>
    where
        S: ProductStore + ?Sized,
    {
        Ok(self.all(store).await?.into_iter().next())
    }

    /// Number of matching products.
    ///
    /// # Errors
    ///
    /// Returns `DataValidationError` if the store query fails.
    pub async fn count<S>(&self, store: &S) -> Result<u64, DataValidationError>
    where
        S: ProductStore + ?Sized,
    {
        store
            .count(&self.filter)
            .await
            .map_err(|e| backend_failure("count", e))
    }
}
