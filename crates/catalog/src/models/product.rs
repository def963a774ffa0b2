//! The product record: typed fields, wire conversions and lifecycle.
//!
//! A [`Product`] starts transient (no id). [`Product::create`] stores it and
//! records the id the backend assigned; from then on [`Product::update`] and
//! [`Product::delete`] address that row. The id cannot be changed afterwards.
//!
//! The wire form is a JSON object:
//!
//! ```json
//! {
//!   "id": 7,
//!   "name": "Fedora",
//!   "description": "A red hat",
//!   "price": "12.50",
//!   "available": true,
//!   "category": "CLOTHS"
//! }
//! ```

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::{Map, Value, json};
use tracing::{debug, info, warn};

use product_catalog_core::{Category, ProductId};

use super::query::ProductQuery;
use crate::db::{ProductFilter, ProductStore, RepositoryError};
use crate::error::DataValidationError;

/// A catalog product.
///
/// Fields other than the id are public; the id is assigned by the backend
/// during [`create`](Self::create) and exposed read-only through
/// [`id`](Self::id).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    id: Option<ProductId>,
    /// Display name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Unit price.
    pub price: Decimal,
    /// Whether the product can currently be ordered.
    pub available: bool,
    /// Classification tag.
    pub category: Category,
}

impl Default for Product {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            description: String::new(),
            price: Decimal::ZERO,
            available: true,
            category: Category::default(),
        }
    }
}

impl Product {
    /// Creates a new transient product.
    ///
    /// # Arguments
    /// * `name` - Product name
    /// * `description` - Free-text description
    /// * `price` - Unit price
    /// * `available` - Whether it can be ordered
    /// * `category` - Classification tag
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: Decimal,
        available: bool,
        category: Category,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: description.into(),
            price,
            available,
            category,
        }
    }

    /// Rehydrate a stored row under its identifier.
    ///
    /// For [`ProductStore`] implementations turning rows back into records.
    #[must_use]
    pub const fn with_id(mut self, id: ProductId) -> Self {
        self.id = Some(id);
        self
    }

    /// The backend-assigned identifier, `None` until [`create`](Self::create)
    /// succeeds.
    #[must_use]
    pub const fn id(&self) -> Option<ProductId> {
        self.id
    }

    // =========================================================================
    // Wire conversions
    // =========================================================================

    /// Convert to the wire mapping.
    ///
    /// `price` is rendered as decimal text so no precision is lost.
    #[must_use]
    pub fn serialize(&self) -> Value {
        json!({
            "id": self.id.map(|id| id.as_i32()),
            "name": self.name,
            "description": self.description,
            "price": self.price.to_string(),
            "available": self.available,
            "category": self.category.as_str(),
        })
    }

    /// Populate this product's fields from a wire mapping.
    ///
    /// `id` is never read from `data`. After an error the product should be
    /// discarded.
    ///
    /// # Errors
    ///
    /// Returns `DataValidationError` if `data` is not an object, a field is
    /// missing, a field has the wrong type, or `category` is not a known name.
    pub fn deserialize(&mut self, data: &Value) -> Result<(), DataValidationError> {
        let fields = ProductFields::parse(data)?;
        self.name = fields.name;
        self.description = fields.description;
        self.price = fields.price;
        self.available = fields.available;
        self.category = fields.category;
        Ok(())
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Persist this transient product and record its new identifier.
    ///
    /// # Errors
    ///
    /// Returns `DataValidationError` if the product already has an id (checked
    /// before touching the store) or if the store rejects the row.
    pub async fn create<S>(&mut self, store: &S) -> Result<ProductId, DataValidationError>
    where
        S: ProductStore + ?Sized,
    {
        if self.id.is_some() {
            return Err(DataValidationError::new(
                "Create called with existing ID field",
            ));
        }

        info!(product = %self, "Creating product");
        let id = store
            .insert(self)
            .await
            .map_err(|e| backend_failure("create", e))?;
        self.id = Some(id);
        info!(%id, "Product created");
        Ok(id)
    }

    /// Write this product's current fields to its stored row.
    ///
    /// # Errors
    ///
    /// Returns `DataValidationError` if the product has no id (checked before
    /// touching the store) or if the store rejects the update.
    pub async fn update<S>(&self, store: &S) -> Result<(), DataValidationError>
    where
        S: ProductStore + ?Sized,
    {
        let Some(id) = self.id else {
            return Err(DataValidationError::new("Update called with empty ID field"));
        };

        info!(%id, "Updating product");
        store
            .commit(self)
            .await
            .map_err(|e| backend_failure("update", e))
    }

    /// Remove this product's row. The in-memory id is kept.
    ///
    /// # Errors
    ///
    /// Returns `DataValidationError` if the product has no id (checked before
    /// touching the store) or if the store fails to delete the row.
    pub async fn delete<S>(&self, store: &S) -> Result<(), DataValidationError>
    where
        S: ProductStore + ?Sized,
    {
        let Some(id) = self.id else {
            return Err(DataValidationError::new("Delete called with empty ID field"));
        };

        info!(%id, "Deleting product");
        store
            .delete(id)
            .await
            .map_err(|e| backend_failure("delete", e))
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    /// Find a product by identifier.
    ///
    /// # Errors
    ///
    /// Returns `DataValidationError` if the store query fails.
    pub async fn find<S>(store: &S, id: ProductId) -> Result<Option<Self>, DataValidationError>
    where
        S: ProductStore + ?Sized,
    {
        debug!(%id, "Looking up product");
        store
            .get(id)
            .await
            .map_err(|e| backend_failure("find", e))
    }

    /// Every stored product. Callers must not rely on the order.
    ///
    /// # Errors
    ///
    /// Returns `DataValidationError` if the store query fails.
    pub async fn all<S>(store: &S) -> Result<Vec<Self>, DataValidationError>
    where
        S: ProductStore + ?Sized,
    {
        debug!("Listing all products");
        store.all().await.map_err(|e| backend_failure("all", e))
    }

    /// Products whose name equals `name` exactly.
    pub fn find_by_name(name: impl Into<String>) -> ProductQuery {
        ProductQuery::new(ProductFilter::Name(name.into()))
    }

    /// Products whose availability equals `available`.
    pub const fn find_by_availability(available: bool) -> ProductQuery {
        ProductQuery::new(ProductFilter::Available(available))
    }

    /// Products in `category`.
    pub const fn find_by_category(category: Category) -> ProductQuery {
        ProductQuery::new(ProductFilter::Category(category))
    }

    /// Products whose price equals `price`.
    ///
    /// Use [`parse_price`] to accept the price as text.
    pub const fn find_by_price(price: Decimal) -> ProductQuery {
        ProductQuery::new(ProductFilter::Price(price))
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "<Product {} id=[{id}]>", self.name),
            None => write!(f, "<Product {} id=[None]>", self.name),
        }
    }
}

/// Parse a price given as text, e.g. from a query string.
///
/// Surrounding whitespace and double quotes are ignored. Digit separators
/// (`1_000`) are rejected since `PostgreSQL` does not accept them.
///
/// # Errors
///
/// Returns `DataValidationError` if the text is not a decimal number.
pub fn parse_price(raw: &str) -> Result<Decimal, DataValidationError> {
    let trimmed = raw.trim_matches(|c: char| c.is_whitespace() || c == '"');
    if trimmed.contains('_') {
        return Err(DataValidationError::invalid_type("decimal", "price", raw));
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| DataValidationError::invalid_type("decimal", "price", raw))
}

pub(crate) fn backend_failure(operation: &'static str, err: RepositoryError) -> DataValidationError {
    warn!(operation, error = %err, "Product store rejected operation");
    DataValidationError::from(err)
}

// =============================================================================
// Typed parse of the wire mapping
// =============================================================================

/// Validated field values extracted from a wire mapping.
#[derive(Debug)]
struct ProductFields {
    name: String,
    description: String,
    price: Decimal,
    available: bool,
    category: Category,
}

impl ProductFields {
    /// Check `data` against the product schema, one field at a time in
    /// declaration order, stopping at the first problem.
    fn parse(data: &Value) -> Result<Self, DataValidationError> {
        let Value::Object(map) = data else {
            return Err(DataValidationError::bad_data(json_type(data)));
        };

        Ok(Self {
            name: text(map, "name")?,
            description: text(map, "description")?,
            price: price(map)?,
            available: boolean(map, "available")?,
            category: category(map)?,
        })
    }
}

fn required<'a>(map: &'a Map<String, Value>, field: &str) -> Result<&'a Value, DataValidationError> {
    map.get(field)
        .ok_or_else(|| DataValidationError::missing(field))
}

fn text(map: &Map<String, Value>, field: &str) -> Result<String, DataValidationError> {
    match required(map, field)? {
        Value::String(s) => Ok(s.clone()),
        other => Err(DataValidationError::invalid_type(
            "text",
            field,
            json_type(other),
        )),
    }
}

fn boolean(map: &Map<String, Value>, field: &str) -> Result<bool, DataValidationError> {
    match required(map, field)? {
        Value::Bool(b) => Ok(*b),
        other => Err(DataValidationError::invalid_type(
            "boolean",
            field,
            json_type(other),
        )),
    }
}

fn price(map: &Map<String, Value>) -> Result<Decimal, DataValidationError> {
    match required(map, "price")? {
        Value::String(s) => parse_price(s),
        Value::Number(n) => parse_price(&n.to_string()),
        other => Err(DataValidationError::invalid_type(
            "decimal",
            "price",
            json_type(other),
        )),
    }
}

fn category(map: &Map<String, Value>) -> Result<Category, DataValidationError> {
    match required(map, "category")? {
        Value::String(name) => {
            Category::from_name(name).map_err(DataValidationError::invalid_attribute)
        }
        other => Err(DataValidationError::invalid_attribute(format!(
            "category must be text, got {}",
            json_type(other)
        ))),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
