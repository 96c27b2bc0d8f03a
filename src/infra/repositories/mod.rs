//! Repository layer - Data access abstraction
//!
//! One generic repository implementation serves all catalog entities,
//! keeping the persistence contract in a single place.

mod base;
pub(crate) mod entities;

pub use base::{
    CatalogEntity, CatalogRepository, Criteria, FieldValue, SearchCriteria, SqlCatalogRepository,
};

// Export mock for service unit tests
#[cfg(test)]
pub use base::MockCatalogRepository;
