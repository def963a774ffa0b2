//! Random product generation for tests and seeding.
//!
//! ```rust,ignore
//! use product_catalog::fixtures::ProductFactory;
//!
//! let one = ProductFactory::new().build();
//! let food = ProductFactory::new().category(Category::Food).batch(3);
//! ```

use rand::Rng;
use rand::seq::IndexedRandom;
use rust_decimal::Decimal;

use product_catalog_core::Category;

use crate::models::Product;

/// Names drawn from when no name override is set.
pub const PRODUCT_NAMES: [&str; 11] = [
    "Hat", "Pants", "Shirt", "Apple", "Banana", "Pots", "Towels", "Ford", "Chevy", "Hammer",
    "Wrench",
];

const DESCRIPTIONS: [&str; 6] = [
    "Sturdy and dependable",
    "Fresh from the farm",
    "A customer favourite",
    "Limited seasonal stock",
    "Imported, ships in two days",
    "Everyday essential",
];

/// Price range in cents: 0.50 to 2000.00.
const MIN_PRICE_CENTS: i64 = 50;
const MAX_PRICE_CENTS: i64 = 200_000;

/// Builds transient products with random but storable field values.
///
/// Every generated product has a non-empty name and a non-negative price
/// with two decimal places, so it passes the `catalog.products` constraints.
#[derive(Debug, Clone, Default)]
pub struct ProductFactory {
    name: Option<String>,
    available: Option<bool>,
    category: Option<Category>,
}

impl ProductFactory {
    /// A factory with every field randomized.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fix the name of generated products.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Fix the availability of generated products.
    #[must_use]
    pub const fn available(mut self, available: bool) -> Self {
        self.available = Some(available);
        self
    }

    /// Fix the category of generated products.
    #[must_use]
    pub const fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Generate one product.
    #[must_use]
    pub fn build(&self) -> Product {
        let mut rng = rand::rng();

        let name = self.name.clone().unwrap_or_else(|| {
            (*PRODUCT_NAMES.choose(&mut rng).unwrap_or(&"Hat")).to_string()
        });
        let description = DESCRIPTIONS
            .choose(&mut rng)
            .copied()
            .unwrap_or_default();
        let price = Decimal::new(rng.random_range(MIN_PRICE_CENTS..=MAX_PRICE_CENTS), 2);
        let available = self.available.unwrap_or_else(|| rng.random_bool(0.5));
        let category = self
            .category
            .or_else(|| Category::ALL.choose(&mut rng).copied())
            .unwrap_or_default();

        Product::new(name, description, price, available, category)
    }

    /// Generate `count` products.
    #[must_use]
    pub fn batch(&self, count: usize) -> Vec<Product> {
        (0..count).map(|_| self.build()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_is_storable() {
        for product in ProductFactory::new().batch(50) {
            assert_eq!(product.id(), None);
            assert!(PRODUCT_NAMES.contains(&product.name.as_str()));
            assert!(!product.description.is_empty());
            assert!(product.price >= Decimal::new(MIN_PRICE_CENTS, 2));
            assert!(product.price <= Decimal::new(MAX_PRICE_CENTS, 2));
            assert_eq!(product.price.scale(), 2);
        }
    }

    #[test]
    fn test_overrides_apply_to_every_product() {
        let products = ProductFactory::new()
            .name("SpecialProduct")
            .available(false)
            .category(Category::Food)
            .batch(5);

        assert_eq!(products.len(), 5);
        for product in products {
            assert_eq!(product.name, "SpecialProduct");
            assert!(!product.available);
            assert_eq!(product.category, Category::Food);
        }
    }
}
