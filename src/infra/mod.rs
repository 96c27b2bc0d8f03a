//! Infrastructure layer - External systems integration
//!
//! This module handles database concerns:
//! - Connection management and migrations
//! - The generic catalog repository
//! - Transaction helpers for mutating operations

pub mod db;
pub mod repositories;
pub(crate) mod transaction;

pub use db::{Database, Migrator};
pub use repositories::{
    CatalogEntity, CatalogRepository, Criteria, FieldValue, SearchCriteria, SqlCatalogRepository,
};

#[cfg(test)]
pub use repositories::MockCatalogRepository;
