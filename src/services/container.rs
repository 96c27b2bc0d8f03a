//! Service container - constructs the catalog service instances.
//!
//! One repository/service pair per entity type, all sharing a single
//! database connection pool.

use std::sync::Arc;

use sea_orm::{DatabaseConnection, IntoActiveModel};

use super::{CatalogManager, CatalogService};
use crate::domain::CatalogKind;
use crate::infra::repositories::entities::{
    department, document_category, documentary_topic, role, settlement,
};
use crate::infra::{CatalogEntity, SqlCatalogRepository};

/// Container holding one service instance per catalog entity.
pub struct Services {
    roles: Arc<dyn CatalogService>,
    departments: Arc<dyn CatalogService>,
    document_categories: Arc<dyn CatalogService>,
    documentary_topics: Arc<dyn CatalogService>,
    settlements: Arc<dyn CatalogService>,
}

impl Services {
    /// Create all services from one database connection.
    pub fn from_connection(db: DatabaseConnection) -> Self {
        Self {
            roles: catalog_service::<role::Entity>(CatalogKind::Role, &db),
            departments: catalog_service::<department::Entity>(CatalogKind::Department, &db),
            document_categories: catalog_service::<document_category::Entity>(
                CatalogKind::DocumentCategory,
                &db,
            ),
            documentary_topics: catalog_service::<documentary_topic::Entity>(
                CatalogKind::DocumentaryTopic,
                &db,
            ),
            settlements: catalog_service::<settlement::Entity>(CatalogKind::Settlement, &db),
        }
    }

    pub fn roles(&self) -> Arc<dyn CatalogService> {
        self.roles.clone()
    }

    pub fn departments(&self) -> Arc<dyn CatalogService> {
        self.departments.clone()
    }

    pub fn document_categories(&self) -> Arc<dyn CatalogService> {
        self.document_categories.clone()
    }

    pub fn documentary_topics(&self) -> Arc<dyn CatalogService> {
        self.documentary_topics.clone()
    }

    pub fn settlements(&self) -> Arc<dyn CatalogService> {
        self.settlements.clone()
    }
}

fn catalog_service<E>(kind: CatalogKind, db: &DatabaseConnection) -> Arc<dyn CatalogService>
where
    E: CatalogEntity,
    E::Model: IntoActiveModel<E::Active> + Sync,
{
    let repository = Arc::new(SqlCatalogRepository::<E>::new(db.clone()));
    Arc::new(CatalogManager::new(kind, repository))
}
