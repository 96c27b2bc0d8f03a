//! Generic catalog repository.
//!
//! One parameterized implementation serves every catalog entity; the
//! per-entity differences (table, label, columns) live behind the
//! [`CatalogEntity`] descriptor implemented by each entity module.

use std::collections::HashMap;
use std::marker::PhantomData;

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QuerySelect,
};

use crate::domain::CatalogEntry;
use crate::errors::{AppError, AppResult};
use crate::infra::transaction::{mutate, mutate_and_refresh, storage_error};
use crate::types::{Page, Pagination};

#[cfg(test)]
use mockall::automock;

/// Exact-match value accepted in `exists_by` criteria.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Int(i64),
    Text(String),
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<FieldValue> for sea_orm::Value {
    fn from(value: FieldValue) -> Self {
        match value {
            FieldValue::Int(i) => i.into(),
            FieldValue::Text(s) => s.into(),
        }
    }
}

/// Field/value pairs combined with logical AND by `exists_by`.
#[derive(Debug, Clone)]
pub struct Criteria(Vec<(String, FieldValue)>);

impl Criteria {
    pub fn field(name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self(vec![(name.into(), value.into())])
    }

    pub fn and(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.0.push((name.into(), value.into()));
        self
    }

    pub fn entries(&self) -> &[(String, FieldValue)] {
        &self.0
    }
}

/// Free-text search criteria: field name to requested substring.
///
/// Unlike [`Criteria`], entries here are matched case-insensitively by
/// substring, combined with logical OR, restricted to the entity's
/// allow-listed searchable fields, and unknown or empty entries are skipped
/// silently instead of rejected. The two serve different callers: fuzzy
/// user-facing search versus internal precondition checks.
pub type SearchCriteria = HashMap<String, String>;

/// Descriptor implemented by each catalog entity module.
///
/// Supplies the statically-declared field list and column accessors the
/// generic repository needs to build queries for the entity's table.
pub trait CatalogEntity: EntityTrait + Send + Sync + 'static {
    type Active: ActiveModelTrait<Entity = Self> + ActiveModelBehavior + Send + 'static;

    /// Label used in invalid-field messages, e.g. "Role"
    const ENTITY_NAME: &'static str;

    /// Declared fields accepted as `exists_by` criteria keys
    const FIELDS: &'static [&'static str];

    /// Fields searchable through `find`
    const SEARCHABLE_FIELDS: &'static [&'static str];

    fn id_column() -> Self::Column;
    fn name_column() -> Self::Column;
    fn column_for(field: &str) -> Option<Self::Column>;
    fn to_entry(model: Self::Model) -> CatalogEntry;
    fn insert_model(entry: &CatalogEntry) -> Self::Active;
    fn update_model(id: i64, entry: &CatalogEntry) -> Self::Active;
}

/// Catalog repository contract, identical for every entity type.
///
/// A pure execution layer: it never originates lifecycle decisions, and
/// absence on `get_by_id` is signalled with `None`, not an error. The only
/// errors raised here are `Database` and `InvalidField`.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Persist the entry: insert when it has no id, update otherwise.
    /// Returns the entry with storage-assigned fields populated.
    async fn save(&self, entry: CatalogEntry) -> AppResult<CatalogEntry>;

    /// Every row, unfiltered, in storage order.
    async fn get_all(&self) -> AppResult<Vec<CatalogEntry>>;

    /// The matching row, or `None` on a miss.
    async fn get_by_id(&self, id: i64) -> AppResult<Option<CatalogEntry>>;

    /// Remove the row. Precondition: the caller has verified existence;
    /// a missing id raises rather than returning `false`.
    async fn delete(&self, id: i64) -> AppResult<bool>;

    /// One page of rows in storage order, plus metadata computed from a
    /// separate count query.
    async fn get_pageable(&self, page: u64, size: u64) -> AppResult<Page<CatalogEntry>>;

    /// One page of rows matching any populated, allow-listed criterion by
    /// case-insensitive substring.
    async fn find(
        &self,
        page: u64,
        size: u64,
        criteria: SearchCriteria,
    ) -> AppResult<Page<CatalogEntry>>;

    /// Whether at least one row matches all given field/value pairs
    /// exactly. Unknown keys raise `InvalidField` before any query runs.
    async fn exists_by(&self, criteria: Criteria) -> AppResult<bool>;
}

/// SeaORM-backed repository, parameterized by entity descriptor.
pub struct SqlCatalogRepository<E: CatalogEntity> {
    db: DatabaseConnection,
    entity: PhantomData<E>,
}

impl<E: CatalogEntity> SqlCatalogRepository<E> {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            entity: PhantomData,
        }
    }
}

/// Reject criteria keys that do not name a declared entity field.
fn validate_fields<E: CatalogEntity>(criteria: &Criteria) -> AppResult<()> {
    for (field, _) in criteria.entries() {
        if !E::FIELDS.contains(&field.as_str()) {
            return Err(AppError::invalid_field(
                format!(
                    "Field '{}' does not exist in the {} model",
                    field,
                    E::ENTITY_NAME
                ),
                format!("Valid fields are: {}", E::FIELDS.join(", ")),
            ));
        }
    }
    Ok(())
}

#[async_trait]
impl<E> CatalogRepository for SqlCatalogRepository<E>
where
    E: CatalogEntity,
    E::Model: IntoActiveModel<E::Active> + Sync,
{
    async fn save(&self, entry: CatalogEntry) -> AppResult<CatalogEntry> {
        mutate_and_refresh::<E, _>(&self.db, "save", move |txn| {
            Box::pin(async move {
                match entry.id {
                    None => E::insert_model(&entry)
                        .insert(txn)
                        .await
                        .map_err(|e| storage_error("save", e)),
                    Some(id) => E::update_model(id, &entry)
                        .update(txn)
                        .await
                        .map_err(|e| storage_error("save", e)),
                }
            })
        })
        .await
    }

    async fn get_all(&self) -> AppResult<Vec<CatalogEntry>> {
        let models = E::find()
            .all(&self.db)
            .await
            .map_err(|e| storage_error("get_all", e))?;

        Ok(models.into_iter().map(E::to_entry).collect())
    }

    async fn get_by_id(&self, id: i64) -> AppResult<Option<CatalogEntry>> {
        let model = E::find()
            .filter(E::id_column().eq(id))
            .one(&self.db)
            .await
            .map_err(|e| storage_error("get_by_id", e))?;

        Ok(model.map(E::to_entry))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        mutate(&self.db, "delete", move |txn| {
            Box::pin(async move {
                // The caller has already verified existence, so a missing
                // row here is a repository fault, not a NotFound.
                E::find()
                    .filter(E::id_column().eq(id))
                    .one(txn)
                    .await
                    .map_err(|e| storage_error("delete", e))?
                    .ok_or_else(|| {
                        AppError::database(
                            "Unexpected repository error in operation: delete",
                            format!("no row with id {id}"),
                        )
                    })?;

                E::delete_many()
                    .filter(E::id_column().eq(id))
                    .exec(txn)
                    .await
                    .map_err(|e| storage_error("delete", e))?;

                Ok(true)
            })
        })
        .await
    }

    async fn get_pageable(&self, page: u64, size: u64) -> AppResult<Page<CatalogEntry>> {
        let offset = page.saturating_sub(1) * size;

        let rows = E::find()
            .offset(offset)
            .limit(size)
            .all(&self.db)
            .await
            .map_err(|e| storage_error("get_pageable", e))?;

        let total = E::find()
            .count(&self.db)
            .await
            .map_err(|e| storage_error("get_pageable", e))?;

        Ok(Page::new(
            rows.into_iter().map(E::to_entry).collect(),
            Pagination::of(page, size, total),
        ))
    }

    async fn find(
        &self,
        page: u64,
        size: u64,
        criteria: SearchCriteria,
    ) -> AppResult<Page<CatalogEntry>> {
        let offset = page.saturating_sub(1) * size;

        // Populated, allow-listed criteria OR together; everything else is
        // skipped rather than rejected.
        let mut condition = Condition::any();
        let mut filtered = false;
        for (field, value) in &criteria {
            if value.is_empty() || !E::SEARCHABLE_FIELDS.contains(&field.as_str()) {
                continue;
            }
            let column = match E::column_for(field) {
                Some(column) => column,
                None => continue,
            };
            let needle = format!("%{}%", value.to_lowercase());
            condition = condition.add(Expr::expr(Func::lower(Expr::col(column))).like(needle));
            filtered = true;
        }

        let mut data_query = E::find();
        let mut count_query = E::find();
        if filtered {
            data_query = data_query.filter(condition.clone());
            count_query = count_query.filter(condition);
        }

        let rows = data_query
            .offset(offset)
            .limit(size)
            .all(&self.db)
            .await
            .map_err(|e| storage_error("find", e))?;

        let total = count_query
            .count(&self.db)
            .await
            .map_err(|e| storage_error("find", e))?;

        Ok(Page::new(
            rows.into_iter().map(E::to_entry).collect(),
            Pagination::of(page, size, total),
        ))
    }

    async fn exists_by(&self, criteria: Criteria) -> AppResult<bool> {
        validate_fields::<E>(&criteria)?;

        let mut condition = Condition::all();
        for (field, value) in criteria.entries() {
            let column = E::column_for(field).ok_or_else(|| {
                AppError::invalid_field(
                    format!(
                        "Field '{}' does not exist in the {} model",
                        field,
                        E::ENTITY_NAME
                    ),
                    format!("Valid fields are: {}", E::FIELDS.join(", ")),
                )
            })?;
            condition = condition.add(column.eq(value.clone()));
        }

        let found = E::find()
            .filter(condition)
            .one(&self.db)
            .await
            .map_err(|e| storage_error("exists_by", e))?;

        Ok(found.is_some())
    }
}
