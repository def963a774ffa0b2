//! Product Catalog Core - Shared types library.
//!
//! This crate provides the types shared by every product catalog component:
//! - `catalog` - Product record, validation and persistence
//! - `cli` - Command-line tools for schema setup and seeding
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access.
//! `sqlx` support is opt-in through the `postgres` feature.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs and the product category enumeration

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
