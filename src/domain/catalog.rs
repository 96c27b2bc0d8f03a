//! Catalog domain entry and related types.
//!
//! All managed reference entities (roles, departments, document categories,
//! documentary topics, settlements) share one shape: a surrogate id, a
//! unique name, and creation/update timestamps. The entity types differ only
//! in which table they live in and how they are labeled in messages.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Names start with a letter and contain only letters (accented included)
/// and spaces.
static NAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-zÁÉÍÓÚáéíóúÑñ][A-Za-zÁÉÍÓÚáéíóúÑñ\s]*$")
        .expect("name pattern is valid")
});

/// The managed reference entity types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogKind {
    Role,
    Department,
    DocumentCategory,
    DocumentaryTopic,
    Settlement,
}

impl CatalogKind {
    /// Singular label used in messages, e.g. "Role with id 7 not found."
    pub fn label(&self) -> &'static str {
        match self {
            CatalogKind::Role => "Role",
            CatalogKind::Department => "Department",
            CatalogKind::DocumentCategory => "Document category",
            CatalogKind::DocumentaryTopic => "Documentary topic",
            CatalogKind::Settlement => "Settlement",
        }
    }

    /// Plural label used in search messages, e.g. "No roles found ..."
    pub fn plural(&self) -> &'static str {
        match self {
            CatalogKind::Role => "roles",
            CatalogKind::Department => "departments",
            CatalogKind::DocumentCategory => "document categories",
            CatalogKind::DocumentaryTopic => "documentary topics",
            CatalogKind::Settlement => "settlements",
        }
    }
}

/// Catalog domain entry.
///
/// `id` and `created_at` are storage-assigned: absent before the first
/// persistence, always present afterwards. `updated_at` stays absent until
/// the first update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: Option<i64>,
    pub name: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl CatalogEntry {
    /// Build a not-yet-persisted entry with only the name populated.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            created_at: None,
            updated_at: None,
        }
    }
}

/// Request body for creating or renaming a catalog entry.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CatalogRequest {
    /// Entry name: letters and spaces, starting with a letter
    #[serde(deserialize_with = "trimmed")]
    #[validate(
        length(min = 4, message = "Name must be at least 4 characters long"),
        regex(
            path = *NAME_PATTERN,
            message = "Name must start with a letter and contain only letters and spaces"
        )
    )]
    #[schema(example = "Administration")]
    pub name: String,
}

/// Trims surrounding whitespace before validation runs.
fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(|s| s.trim().to_string())
}

/// Response projection of a persisted catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CatalogResponse {
    /// Unique identifier
    #[schema(example = 1)]
    pub id: i64,
    /// Entry name
    #[schema(example = "Administration")]
    pub name: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp, absent until the first update
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}
