//! Product record and lazy lookups.
//!
//! - [`Product`] - The record: wire conversions, lifecycle, finders
//! - [`ProductQuery`] - Deferred single-attribute lookup

pub mod product;
pub mod query;

pub use product::{Product, parse_price};
pub use query::ProductQuery;
