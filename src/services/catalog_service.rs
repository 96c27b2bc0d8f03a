//! Catalog service - business rules shared by every catalog entity.
//!
//! One generic pipeline instantiated per entity type: uniqueness on create,
//! existence-then-uniqueness on update, existence on read/delete, and
//! parameter validation for paging. The repository below it is a pure
//! execution layer; every lifecycle decision is made here.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{CatalogEntry, CatalogKind, CatalogRequest, CatalogResponse};
use crate::errors::{AppError, AppResult};
use crate::infra::{CatalogRepository, Criteria, SearchCriteria};
use crate::types::{MessageResponse, Page};

/// Catalog service contract, identical for every entity type.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Create a new entry after checking name uniqueness.
    async fn add(&self, request: CatalogRequest) -> AppResult<CatalogResponse>;

    /// Every entry, unfiltered.
    async fn get_all(&self) -> AppResult<Vec<CatalogResponse>>;

    /// One entry by id; NotFound when the id does not exist.
    async fn get_by_id(&self, id: i64) -> AppResult<CatalogResponse>;

    /// Rename an entry. The entry's own current name never conflicts.
    async fn update(&self, id: i64, request: CatalogRequest) -> AppResult<CatalogResponse>;

    /// Remove an entry; the outcome is reported in the message body.
    async fn delete(&self, id: i64) -> AppResult<MessageResponse>;

    /// One page of entries.
    async fn get_paginated(&self, page: u64, size: u64) -> AppResult<Page<CatalogResponse>>;

    /// One page of entries whose name contains the term; NotFound when the
    /// result set is empty.
    async fn find(
        &self,
        page: u64,
        size: u64,
        search_term: String,
    ) -> AppResult<Page<CatalogResponse>>;
}

/// Concrete implementation over an injected repository.
pub struct CatalogManager {
    repository: Arc<dyn CatalogRepository>,
    kind: CatalogKind,
}

impl CatalogManager {
    pub fn new(kind: CatalogKind, repository: Arc<dyn CatalogRepository>) -> Self {
        Self { repository, kind }
    }

    /// Project a persisted entry to its response shape.
    ///
    /// A persisted entry missing a storage-assigned field is an
    /// implementation fault, not a caller error.
    fn project(&self, entry: CatalogEntry) -> AppResult<CatalogResponse> {
        let id = entry
            .id
            .ok_or_else(|| self.implementation_fault("id"))?;
        let created_at = entry
            .created_at
            .ok_or_else(|| self.implementation_fault("created_at"))?;

        Ok(CatalogResponse {
            id,
            name: entry.name,
            created_at,
            updated_at: entry.updated_at,
        })
    }

    fn implementation_fault(&self, field: &str) -> AppError {
        AppError::server(format!(
            "{} entry is missing its persisted '{}' attribute",
            self.kind.label(),
            field
        ))
    }

    fn check_paging(&self, page: u64, size: u64) -> AppResult<()> {
        if page < 1 {
            return Err(AppError::bad_request(
                "Invalid page number",
                "Page number must be greater than 0.",
            ));
        }
        if size < 1 {
            return Err(AppError::bad_request(
                "Invalid size number",
                "Size number must be greater than 0.",
            ));
        }
        Ok(())
    }

    fn name_conflict(&self, name: &str) -> AppError {
        AppError::conflict(format!(
            "{} with name {} already exists.",
            self.kind.label(),
            name
        ))
    }

    fn not_found(&self, id: i64) -> AppError {
        AppError::not_found(format!("{} with id {} not found.", self.kind.label(), id))
    }

    fn vanished(&self, id: i64) -> AppError {
        AppError::server(format!(
            "{} with id {} disappeared between existence check and load",
            self.kind.label(),
            id
        ))
    }
}

#[async_trait]
impl CatalogService for CatalogManager {
    async fn add(&self, request: CatalogRequest) -> AppResult<CatalogResponse> {
        let name_taken = self
            .repository
            .exists_by(Criteria::field("name", request.name.as_str()))
            .await?;
        if name_taken {
            return Err(self.name_conflict(&request.name));
        }

        let created = self.repository.save(CatalogEntry::new(request.name)).await?;
        self.project(created)
    }

    async fn get_all(&self) -> AppResult<Vec<CatalogResponse>> {
        let entries = self.repository.get_all().await?;
        entries.into_iter().map(|entry| self.project(entry)).collect()
    }

    async fn get_by_id(&self, id: i64) -> AppResult<CatalogResponse> {
        let exists = self
            .repository
            .exists_by(Criteria::field("id", id))
            .await?;
        if !exists {
            return Err(self.not_found(id));
        }

        let entry = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| self.vanished(id))?;

        self.project(entry)
    }

    async fn update(&self, id: i64, request: CatalogRequest) -> AppResult<CatalogResponse> {
        let exists = self
            .repository
            .exists_by(Criteria::field("id", id))
            .await?;
        if !exists {
            return Err(self.not_found(id));
        }

        let mut entry = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| self.vanished(id))?;

        // Renaming an entry to its own current name is not a conflict.
        if entry.name != request.name {
            let name_taken = self
                .repository
                .exists_by(Criteria::field("name", request.name.as_str()))
                .await?;
            if name_taken {
                return Err(self.name_conflict(&request.name));
            }
        }

        entry.name = request.name;
        entry.updated_at = Some(Utc::now());

        let updated = self.repository.save(entry).await?;
        self.project(updated)
    }

    async fn delete(&self, id: i64) -> AppResult<MessageResponse> {
        let exists = self
            .repository
            .exists_by(Criteria::field("id", id))
            .await?;
        if !exists {
            return Err(self.not_found(id));
        }

        let deleted = self.repository.delete(id).await?;
        if deleted {
            Ok(MessageResponse::ok(
                format!("{} deleted successfully.", self.kind.label()),
                format!("{} with id {} deleted successfully.", self.kind.label(), id),
            ))
        } else {
            Ok(MessageResponse::failed(
                format!("Failed to delete {}.", self.kind.label().to_lowercase()),
                format!(
                    "{} with id {} could not be deleted.",
                    self.kind.label(),
                    id
                ),
            ))
        }
    }

    async fn get_paginated(&self, page: u64, size: u64) -> AppResult<Page<CatalogResponse>> {
        self.check_paging(page, size)?;

        let page_result = self.repository.get_pageable(page, size).await?;
        page_result.try_map(|entry| self.project(entry))
    }

    async fn find(
        &self,
        page: u64,
        size: u64,
        search_term: String,
    ) -> AppResult<Page<CatalogResponse>> {
        self.check_paging(page, size)?;

        let mut criteria = SearchCriteria::new();
        criteria.insert("name".to_string(), search_term.clone());

        let page_result = self.repository.find(page, size, criteria).await?;
        if page_result.data.is_empty() {
            return Err(AppError::not_found(format!(
                "No {} found with the search term {}.",
                self.kind.plural(),
                search_term
            )));
        }

        page_result.try_map(|entry| self.project(entry))
    }
}
