//! Domain layer - Core business entities.
//!
//! Contains the catalog entry model shared by every managed reference
//! entity type, independent of infrastructure concerns.

pub mod catalog;

pub use catalog::{CatalogEntry, CatalogKind, CatalogRequest, CatalogResponse};
