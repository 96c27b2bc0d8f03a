//! File Track API - reference catalog service
//!
//! CRUD and paginated-search endpoints over the system's reference
//! catalogs (roles, departments, document categories, documentary topics,
//! settlements), built on a generic transactional repository and a shared
//! service validation pipeline.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities
//! - **services**: Application use cases and business rules
//! - **infra**: Infrastructure concerns (database, repositories, transactions)
//! - **api**: HTTP handlers, extractors, and routes
//! - **types**: Shared types (pagination, responses)
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{CatalogEntry, CatalogKind, CatalogRequest, CatalogResponse};
pub use errors::{AppError, AppResult, ErrorKind};
