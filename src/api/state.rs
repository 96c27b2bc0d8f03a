//! Application state - Dependency injection container.
//!
//! Holds one catalog service per managed entity plus the database handle
//! used by the health endpoint.

use std::sync::Arc;

use crate::infra::Database;
use crate::services::{CatalogService, Services};

/// Application state containing all services
#[derive(Clone)]
pub struct AppState {
    pub roles: Arc<dyn CatalogService>,
    pub departments: Arc<dyn CatalogService>,
    pub document_categories: Arc<dyn CatalogService>,
    pub documentary_topics: Arc<dyn CatalogService>,
    pub settlements: Arc<dyn CatalogService>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from a connected database, wiring one
    /// repository/service pair per entity.
    pub fn from_database(database: Arc<Database>) -> Self {
        let services = Services::from_connection(database.get_connection());

        Self {
            roles: services.roles(),
            departments: services.departments(),
            document_categories: services.document_categories(),
            documentary_topics: services.documentary_topics(),
            settlements: services.settlements(),
            database,
        }
    }
}
