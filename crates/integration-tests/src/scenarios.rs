//! Store-agnostic record scenarios.
//!
//! Each function takes an empty store, drives the `Product` API against it
//! and asserts on the outcome. The test files run every scenario against
//! each backend.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc, clippy::indexing_slicing)]

use rust_decimal::Decimal;
use serde_json::json;

use product_catalog::fixtures::ProductFactory;
use product_catalog::{Category, Product, ProductId, ProductStore};

/// Create a product and read it back by id.
pub async fn create_then_find<S: ProductStore + ?Sized>(store: &S) {
    let mut product = ProductFactory::new().build();
    assert_eq!(product.id(), None);

    let id = product.create(store).await.unwrap();
    assert_eq!(product.id(), Some(id));

    let found = Product::find(store, id).await.unwrap().unwrap();
    assert_eq!(found.id(), Some(id));
    assert_eq!(found.name, product.name);
    assert_eq!(found.description, product.description);
    assert_eq!(found.price, product.price);
    assert_eq!(found.available, product.available);
    assert_eq!(found.category, product.category);

    assert_eq!(Product::all(store).await.unwrap().len(), 1);
}

/// Lookup of an id that was never assigned.
pub async fn find_missing<S: ProductStore + ?Sized>(store: &S) {
    let found = Product::find(store, ProductId::new(i32::MAX)).await.unwrap();
    assert!(found.is_none());
}

/// Populate a record from the wire form, store it and serialize it back.
pub async fn deserialize_create_serialize<S: ProductStore + ?Sized>(store: &S) {
    let mut product = Product::default();
    product
        .deserialize(&json!({
            "name": "Fedora",
            "description": "A red hat",
            "price": "12.50",
            "available": true,
            "category": "CLOTHS",
        }))
        .unwrap();

    let id = product.create(store).await.unwrap();
    let stored = Product::find(store, id).await.unwrap().unwrap();

    assert_eq!(
        stored.serialize(),
        json!({
            "id": id.as_i32(),
            "name": "Fedora",
            "description": "A red hat",
            "price": "12.50",
            "available": true,
            "category": "CLOTHS",
        })
    );
    assert_eq!(stored.to_string(), format!("<Product Fedora id=[{id}]>"));
}

/// Change a stored product and check the row follows.
pub async fn update<S: ProductStore + ?Sized>(store: &S) {
    let mut product = ProductFactory::new().build();
    let id = product.create(store).await.unwrap();

    product.description = "testing".to_string();
    product.update(store).await.unwrap();
    assert_eq!(product.id(), Some(id));

    let all = Product::all(store).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id(), Some(id));
    assert_eq!(all[0].description, "testing");
}

/// Update without an id is refused.
pub async fn update_without_id<S: ProductStore + ?Sized>(store: &S) {
    let product = ProductFactory::new().build();
    let err = product.update(store).await.unwrap_err();
    assert_eq!(err.to_string(), "Update called with empty ID field");
    assert!(Product::all(store).await.unwrap().is_empty());
}

/// Delete a stored product; later lookups miss and a second delete fails.
pub async fn delete<S: ProductStore + ?Sized>(store: &S) {
    let mut product = ProductFactory::new().build();
    let id = product.create(store).await.unwrap();
    assert_eq!(Product::all(store).await.unwrap().len(), 1);

    product.delete(store).await.unwrap();

    assert_eq!(product.id(), Some(id));
    assert!(Product::find(store, id).await.unwrap().is_none());
    assert!(Product::all(store).await.unwrap().is_empty());
    assert!(product.delete(store).await.is_err());
    assert!(product.update(store).await.is_err());
}

/// List every stored product.
pub async fn list_all<S: ProductStore + ?Sized>(store: &S) {
    assert!(Product::all(store).await.unwrap().is_empty());

    for mut product in ProductFactory::new().batch(5) {
        product.create(store).await.unwrap();
    }

    assert_eq!(Product::all(store).await.unwrap().len(), 5);
}

/// Three products share a name among others that do not.
pub async fn find_by_name<S: ProductStore + ?Sized>(store: &S) {
    for mut product in ProductFactory::new().name("SpecialProduct").batch(3) {
        product.create(store).await.unwrap();
    }
    for mut product in ProductFactory::new().batch(4) {
        product.create(store).await.unwrap();
    }

    let query = Product::find_by_name("SpecialProduct");
    let found = query.all(store).await.unwrap();
    assert_eq!(found.len(), 3);
    assert!(found.iter().all(|p| p.name == "SpecialProduct"));
    assert_eq!(query.count(store).await.unwrap(), 3);
}

/// Five available products and one that is not.
pub async fn find_by_availability<S: ProductStore + ?Sized>(store: &S) {
    for mut product in ProductFactory::new().available(true).batch(5) {
        product.create(store).await.unwrap();
    }
    ProductFactory::new()
        .available(false)
        .build()
        .create(store)
        .await
        .unwrap();

    let available = Product::find_by_availability(true)
        .all(store)
        .await
        .unwrap();
    assert_eq!(available.len(), 5);
    assert!(available.iter().all(|p| p.available));

    let unavailable = Product::find_by_availability(false)
        .first(store)
        .await
        .unwrap()
        .unwrap();
    assert!(!unavailable.available);
}

/// Three FOOD products among products of other categories.
pub async fn find_by_category<S: ProductStore + ?Sized>(store: &S) {
    for mut product in ProductFactory::new().category(Category::Food).batch(3) {
        product.create(store).await.unwrap();
    }
    for category in [Category::Tools, Category::Automotive, Category::Cloths] {
        ProductFactory::new()
            .category(category)
            .build()
            .create(store)
            .await
            .unwrap();
    }

    let food = Product::find_by_category(Category::Food)
        .all(store)
        .await
        .unwrap();
    assert_eq!(food.len(), 3);
    assert!(food.iter().all(|p| p.category == Category::Food));
    assert_eq!(
        Product::find_by_category(Category::Housewares)
            .count(store)
            .await
            .unwrap(),
        0
    );
}

/// Exact-price lookup, with the price given as text.
pub async fn find_by_price<S: ProductStore + ?Sized>(store: &S) {
    let mut products = ProductFactory::new().batch(4);
    for (product, cents) in products.iter_mut().zip([1999, 1999, 500, 12_345]) {
        product.price = Decimal::new(cents, 2);
        product.create(store).await.unwrap();
    }

    let price = product_catalog::parse_price("\"19.99\"").unwrap();
    let found = Product::find_by_price(price).all(store).await.unwrap();
    assert_eq!(found.len(), 2);
    assert!(found.iter().all(|p| p.price == Decimal::new(1999, 2)));
}

/// The backend refuses rows that break its constraints.
pub async fn backend_rejects_invalid_rows<S: ProductStore + ?Sized>(store: &S) {
    let mut negative = ProductFactory::new().build();
    negative.price = Decimal::new(-1, 0);
    let err = negative.create(store).await.unwrap_err();
    assert!(err.to_string().starts_with("constraint violation"));
    assert_eq!(negative.id(), None);

    let mut nameless = ProductFactory::new().name("").build();
    assert!(nameless.create(store).await.is_err());
    assert_eq!(nameless.id(), None);

    assert!(Product::all(store).await.unwrap().is_empty());
}

/// Values wider than their columns are refused and nothing is stored.
pub async fn backend_rejects_oversized_values<S: ProductStore + ?Sized>(store: &S) {
    let mut long_name = ProductFactory::new().name("x".repeat(101)).build();
    let err = long_name.create(store).await.unwrap_err();
    assert!(err.to_string().starts_with("constraint violation"));
    assert_eq!(long_name.id(), None);

    let mut long_description = ProductFactory::new().build();
    long_description.description = "d".repeat(251);
    let err = long_description.create(store).await.unwrap_err();
    assert!(err.to_string().starts_with("constraint violation"));

    let mut too_expensive = ProductFactory::new().build();
    too_expensive.price = Decimal::new(100_000_000_000, 2);
    let err = too_expensive.create(store).await.unwrap_err();
    assert!(err.to_string().starts_with("constraint violation"));

    assert!(Product::all(store).await.unwrap().is_empty());

    let mut widest = ProductFactory::new().name("n".repeat(100)).build();
    widest.description = "d".repeat(250);
    widest.price = Decimal::new(9_999_999_999, 2);
    let id = widest.create(store).await.unwrap();
    let stored = Product::find(store, id).await.unwrap().unwrap();
    assert_eq!(stored.price, Decimal::new(9_999_999_999, 2));
}
