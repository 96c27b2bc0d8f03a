//! Catalog service integration tests.
//!
//! These run the full service pipeline against an in-memory repository
//! that reproduces the storage contract the services rely on: unique
//! names, AND-matched exists_by, OR/substring find.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use filetrack_api::domain::{CatalogEntry, CatalogKind, CatalogRequest};
use filetrack_api::errors::{AppError, AppResult, ErrorKind};
use filetrack_api::infra::{CatalogRepository, Criteria, FieldValue, SearchCriteria};
use filetrack_api::services::{CatalogManager, CatalogService};
use filetrack_api::types::{Page, Pagination};

/// In-memory catalog repository.
struct InMemoryRepository {
    rows: Mutex<Vec<CatalogEntry>>,
    next_id: Mutex<i64>,
}

impl InMemoryRepository {
    fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            next_id: Mutex::new(1),
        }
    }

    fn page_of(rows: Vec<CatalogEntry>, page: u64, size: u64) -> Page<CatalogEntry> {
        let total = rows.len() as u64;
        let offset = (page.saturating_sub(1) * size) as usize;
        let data = rows
            .into_iter()
            .skip(offset)
            .take(size as usize)
            .collect();
        Page::new(data, Pagination::of(page, size, total))
    }
}

#[async_trait]
impl CatalogRepository for InMemoryRepository {
    async fn save(&self, entry: CatalogEntry) -> AppResult<CatalogEntry> {
        let mut rows = self.rows.lock().unwrap();
        match entry.id {
            None => {
                if rows.iter().any(|r| r.name == entry.name) {
                    return Err(AppError::database(
                        "Data integrity violation",
                        format!("duplicate key value on name: {}", entry.name),
                    ));
                }
                let mut next_id = self.next_id.lock().unwrap();
                let stored = CatalogEntry {
                    id: Some(*next_id),
                    name: entry.name,
                    created_at: Some(Utc::now()),
                    updated_at: None,
                };
                *next_id += 1;
                rows.push(stored.clone());
                Ok(stored)
            }
            Some(id) => {
                if rows
                    .iter()
                    .any(|r| r.id != Some(id) && r.name == entry.name)
                {
                    return Err(AppError::database(
                        "Data integrity violation",
                        format!("duplicate key value on name: {}", entry.name),
                    ));
                }
                let row = rows
                    .iter_mut()
                    .find(|r| r.id == Some(id))
                    .ok_or_else(|| {
                        AppError::database(
                            "Database operation failure: save",
                            format!("row {id} missing"),
                        )
                    })?;
                row.name = entry.name;
                row.updated_at = entry.updated_at;
                Ok(row.clone())
            }
        }
    }

    async fn get_all(&self) -> AppResult<Vec<CatalogEntry>> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn get_by_id(&self, id: i64) -> AppResult<Option<CatalogEntry>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == Some(id))
            .cloned())
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let mut rows = self.rows.lock().unwrap();
        let position = rows.iter().position(|r| r.id == Some(id)).ok_or_else(|| {
            AppError::database(
                "Unexpected repository error in operation: delete",
                format!("no row with id {id}"),
            )
        })?;
        rows.remove(position);
        Ok(true)
    }

    async fn get_pageable(&self, page: u64, size: u64) -> AppResult<Page<CatalogEntry>> {
        Ok(Self::page_of(self.rows.lock().unwrap().clone(), page, size))
    }

    async fn find(
        &self,
        page: u64,
        size: u64,
        criteria: SearchCriteria,
    ) -> AppResult<Page<CatalogEntry>> {
        let rows = self.rows.lock().unwrap();
        let needles: Vec<String> = criteria
            .iter()
            .filter(|(field, value)| field.as_str() == "name" && !value.is_empty())
            .map(|(_, value)| value.to_lowercase())
            .collect();

        let matches: Vec<CatalogEntry> = rows
            .iter()
            .filter(|r| {
                needles.is_empty()
                    || needles
                        .iter()
                        .any(|needle| r.name.to_lowercase().contains(needle))
            })
            .cloned()
            .collect();

        Ok(Self::page_of(matches, page, size))
    }

    async fn exists_by(&self, criteria: Criteria) -> AppResult<bool> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().any(|row| {
            criteria
                .entries()
                .iter()
                .all(|(field, value)| match (field.as_str(), value) {
                    ("id", FieldValue::Int(id)) => row.id == Some(*id),
                    ("name", FieldValue::Text(name)) => &row.name == name,
                    _ => false,
                })
        }))
    }
}

fn role_service() -> CatalogManager {
    CatalogManager::new(CatalogKind::Role, Arc::new(InMemoryRepository::new()))
}

fn request(name: &str) -> CatalogRequest {
    CatalogRequest {
        name: name.to_string(),
    }
}

#[tokio::test]
async fn create_then_duplicate_then_rename_scenario() {
    let service = role_service();

    // Create succeeds and returns storage-assigned fields
    let admin = service.add(request("Administrador")).await.unwrap();
    assert_eq!(admin.id, 1);
    assert_eq!(admin.name, "Administrador");

    // Creating the same name again conflicts before any write
    let err = service.add(request("Administrador")).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(err.kind().status().as_u16(), 409);

    // Renaming an entry to its own name is not a conflict
    let same = service.update(1, request("Administrador")).await.unwrap();
    assert_eq!(same.name, "Administrador");

    // Renaming onto another entry's name conflicts
    let user = service.add(request("Usuario")).await.unwrap();
    assert_eq!(user.id, 2);
    let err = service.update(1, request("Usuario")).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);

    // Deleting a missing id is NotFound
    let err = service.delete(999).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.kind().status().as_u16(), 404);
}

#[tokio::test]
async fn update_stamps_updated_at_and_keeps_created_at() {
    let service = role_service();

    let created = service.add(request("Mesa de Partes")).await.unwrap();
    assert!(created.updated_at.is_none());

    let updated = service.update(created.id, request("Archivo Central")).await.unwrap();
    assert_eq!(updated.name, "Archivo Central");
    assert!(updated.updated_at.is_some());
    assert_eq!(updated.created_at, created.created_at);
}

#[tokio::test]
async fn delete_then_read_is_not_found() {
    let service = role_service();

    let created = service.add(request("Temporal")).await.unwrap();
    let response = service.delete(created.id).await.unwrap();
    assert!(response.success);
    assert_eq!(response.status_code, 200);

    let err = service.get_by_id(created.id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn pagination_metadata_follows_the_row_count() {
    let service = role_service();

    for letter in ('A'..='Y').take(25) {
        service.add(request(&format!("Zona {letter}"))).await.unwrap();
    }

    let middle = service.get_paginated(2, 10).await.unwrap();
    assert_eq!(middle.data.len(), 10);
    assert_eq!(middle.meta.total, 25);
    assert_eq!(middle.meta.total_pages, 3);
    assert_eq!(middle.meta.next_page, Some(3));
    assert_eq!(middle.meta.previous_page, Some(1));

    let last = service.get_paginated(3, 10).await.unwrap();
    assert_eq!(last.data.len(), 5);
    assert_eq!(last.meta.next_page, None);
}

#[tokio::test]
async fn empty_table_lists_one_empty_page() {
    let service = role_service();

    let page = service.get_paginated(1, 10).await.unwrap();
    assert!(page.data.is_empty());
    assert_eq!(page.meta.total, 0);
    assert_eq!(page.meta.total_pages, 1);
}

#[tokio::test]
async fn search_matches_substrings_case_insensitively() {
    let service = role_service();
    service.add(request("Administrador")).await.unwrap();
    service.add(request("Usuario")).await.unwrap();
    service.add(request("Auditor")).await.unwrap();

    let page = service.find(1, 10, "ADMIN".to_string()).await.unwrap();
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].name, "Administrador");
}

#[tokio::test]
async fn search_with_empty_term_returns_everything() {
    let service = role_service();
    service.add(request("Administrador")).await.unwrap();
    service.add(request("Usuario")).await.unwrap();

    let page = service.find(1, 10, String::new()).await.unwrap();
    assert_eq!(page.data.len(), 2);
    assert_eq!(page.meta.total, 2);
}

#[tokio::test]
async fn search_without_matches_is_not_found() {
    let service = role_service();
    service.add(request("Administrador")).await.unwrap();

    let err = service.find(1, 10, "zzz-nomatch".to_string()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(err.details().unwrap().contains("zzz-nomatch"));
}
