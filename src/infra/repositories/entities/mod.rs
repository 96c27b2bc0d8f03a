//! SeaORM entity definitions for the catalog tables.
//!
//! Every catalog table shares the same four columns (id, unique name,
//! created_at, updated_at), so each entity module implements the
//! [`CatalogEntity`](super::CatalogEntity) descriptor through the macro
//! below; only the table name and label differ.

/// Implements the catalog entity descriptor for one entity module.
macro_rules! catalog_entity_impl {
    ($entity:ident, $active:ident, $column:ident, $label:literal) => {
        impl $crate::infra::repositories::CatalogEntity for $entity {
            type Active = $active;

            const ENTITY_NAME: &'static str = $label;
            const FIELDS: &'static [&'static str] = &["id", "name", "created_at", "updated_at"];
            const SEARCHABLE_FIELDS: &'static [&'static str] = &["name"];

            fn id_column() -> Self::Column {
                $column::Id
            }

            fn name_column() -> Self::Column {
                $column::Name
            }

            fn column_for(field: &str) -> Option<Self::Column> {
                match field {
                    "id" => Some($column::Id),
                    "name" => Some($column::Name),
                    "created_at" => Some($column::CreatedAt),
                    "updated_at" => Some($column::UpdatedAt),
                    _ => None,
                }
            }

            fn to_entry(model: Self::Model) -> $crate::domain::CatalogEntry {
                $crate::domain::CatalogEntry {
                    id: Some(model.id),
                    name: model.name,
                    created_at: model.created_at,
                    updated_at: model.updated_at,
                }
            }

            fn insert_model(entry: &$crate::domain::CatalogEntry) -> Self::Active {
                // id and created_at are storage-assigned
                $active {
                    id: sea_orm::ActiveValue::NotSet,
                    name: sea_orm::ActiveValue::Set(entry.name.clone()),
                    created_at: sea_orm::ActiveValue::NotSet,
                    updated_at: sea_orm::ActiveValue::NotSet,
                }
            }

            fn update_model(id: i64, entry: &$crate::domain::CatalogEntry) -> Self::Active {
                // created_at is never touched after the first persistence
                $active {
                    id: sea_orm::ActiveValue::Set(id),
                    name: sea_orm::ActiveValue::Set(entry.name.clone()),
                    created_at: sea_orm::ActiveValue::NotSet,
                    updated_at: sea_orm::ActiveValue::Set(entry.updated_at),
                }
            }
        }
    };
}

pub mod department;
pub mod document_category;
pub mod documentary_topic;
pub mod role;
pub mod settlement;
