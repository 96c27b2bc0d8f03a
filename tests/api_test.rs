//! Integration tests for the catalog API endpoints.
//!
//! These tests drive one entity router with a stub service to check status
//! codes, validation rejections, and the uniform error body, without
//! requiring a database connection.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use chrono::Utc;
use http_body_util::BodyExt;
use tower::ServiceExt;

use filetrack_api::api::handlers::catalog_routes;
use filetrack_api::domain::{CatalogRequest, CatalogResponse};
use filetrack_api::errors::{AppError, AppResult};
use filetrack_api::services::CatalogService;
use filetrack_api::types::{MessageResponse, Page, Pagination};

// =============================================================================
// Stub service
// =============================================================================

fn response(id: i64, name: &str) -> CatalogResponse {
    CatalogResponse {
        id,
        name: name.to_string(),
        created_at: Utc::now(),
        updated_at: None,
    }
}

/// Stub catalog service with one known entry (id 1, "Administrador").
struct StubCatalogService;

#[async_trait]
impl CatalogService for StubCatalogService {
    async fn add(&self, request: CatalogRequest) -> AppResult<CatalogResponse> {
        if request.name == "Administrador" {
            return Err(AppError::conflict(
                "Role with name Administrador already exists.",
            ));
        }
        Ok(response(2, &request.name))
    }

    async fn get_all(&self) -> AppResult<Vec<CatalogResponse>> {
        Ok(vec![response(1, "Administrador")])
    }

    async fn get_by_id(&self, id: i64) -> AppResult<CatalogResponse> {
        if id == 1 {
            Ok(response(1, "Administrador"))
        } else {
            Err(AppError::not_found(format!("Role with id {id} not found.")))
        }
    }

    async fn update(&self, id: i64, request: CatalogRequest) -> AppResult<CatalogResponse> {
        Ok(response(id, &request.name))
    }

    async fn delete(&self, id: i64) -> AppResult<MessageResponse> {
        if id == 1 {
            Ok(MessageResponse::ok(
                "Role deleted successfully.",
                "Role with id 1 deleted successfully.",
            ))
        } else {
            Err(AppError::not_found(format!("Role with id {id} not found.")))
        }
    }

    async fn get_paginated(&self, page: u64, size: u64) -> AppResult<Page<CatalogResponse>> {
        Ok(Page::new(
            vec![response(1, "Administrador")],
            Pagination::of(page, size, 1),
        ))
    }

    async fn find(
        &self,
        page: u64,
        size: u64,
        search_term: String,
    ) -> AppResult<Page<CatalogResponse>> {
        if search_term == "zzz-nomatch" {
            return Err(AppError::not_found(format!(
                "No roles found with the search term {search_term}."
            )));
        }
        Ok(Page::new(
            vec![response(1, "Administrador")],
            Pagination::of(page, size, 1),
        ))
    }
}

fn router() -> axum::Router {
    catalog_routes(Arc::new(StubCatalogService))
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn create_returns_201_with_the_projection() {
    let response = router()
        .oneshot(json_request("POST", "/", r#"{"name": "Usuario Nuevo"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["id"], 2);
    assert_eq!(body["name"], "Usuario Nuevo");
}

#[tokio::test]
async fn create_with_invalid_name_is_rejected_before_the_service() {
    // Digits fail the name pattern
    let response = router()
        .oneshot(json_request("POST", "/", r#"{"name": "Role 123"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["type"], "Bad Request Error");
    assert_eq!(body["code"], 400);
}

#[tokio::test]
async fn create_with_short_name_is_rejected() {
    let response = router()
        .oneshot(json_request("POST", "/", r#"{"name": "Abc"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn duplicate_create_surfaces_the_conflict_body() {
    let response = router()
        .oneshot(json_request("POST", "/", r#"{"name": "Administrador"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_eq!(body["type"], "Conflict Error");
    assert_eq!(body["code"], 409);
    assert_eq!(
        body["details"],
        "Role with name Administrador already exists."
    );
    assert!(body["time"].is_string());
}

#[tokio::test]
async fn list_returns_every_entry() {
    let response = router().oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn get_of_missing_id_maps_to_the_error_body() {
    let response = router().oneshot(get("/999")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["type"], "Not Found Error");
    assert_eq!(body["code"], 404);
    assert_eq!(body["details"], "Role with id 999 not found.");
}

#[tokio::test]
async fn paginated_listing_carries_the_meta_block() {
    let response = router().oneshot(get("/paginated?page=1&size=10")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["meta"]["current_page"], 1);
    assert_eq!(body["meta"]["per_page"], 10);
    assert_eq!(body["meta"]["total"], 1);
    assert_eq!(body["meta"]["total_pages"], 1);
}

#[tokio::test]
async fn search_without_matches_maps_to_not_found() {
    let response = router()
        .oneshot(get("/search?search_term=zzz-nomatch"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["details"], "No roles found with the search term zzz-nomatch.");
}

#[tokio::test]
async fn delete_reports_the_outcome_in_the_body() {
    let response = router()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["status_code"], 200);
}

#[tokio::test]
async fn update_returns_the_renamed_entry() {
    let response = router()
        .oneshot(json_request("PUT", "/1", r#"{"name": "Supervisor"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["id"], 1);
    assert_eq!(body["name"], "Supervisor");
}
