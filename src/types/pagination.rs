//! Pagination types for list and search endpoints.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::config::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE};

/// Pagination query parameters (reusable across all list endpoints)
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct PageQuery {
    /// Page number to retrieve (1-indexed)
    #[serde(default = "default_page")]
    pub page: u64,
    /// Number of items per page
    #[serde(default = "default_size")]
    pub size: u64,
}

/// Query parameters for search endpoints
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct SearchQuery {
    /// Term matched against entry names (case-insensitive substring)
    pub search_term: Option<String>,
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_size")]
    pub size: u64,
}

fn default_page() -> u64 {
    DEFAULT_PAGE_NUMBER
}

fn default_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

/// Page metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Pagination {
    pub current_page: u64,
    pub per_page: u64,
    pub total: u64,
    pub total_pages: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_page: Option<u64>,
}

impl Pagination {
    /// Compute page metadata for a total row count.
    ///
    /// `total_pages` is `ceil(total / size)` with a floor of 1 when the
    /// table is empty, so an empty result still reports one (empty) page.
    pub fn of(page: u64, size: u64, total: u64) -> Self {
        let total_pages = if total > 0 && size > 0 {
            total.div_ceil(size)
        } else {
            1
        };

        Self {
            current_page: page,
            per_page: size,
            total,
            total_pages,
            next_page: (page < total_pages).then(|| page + 1),
            previous_page: (page > 1).then(|| page - 1),
        }
    }
}

/// One page of results plus its metadata
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub meta: Pagination,
}

impl<T> Page<T> {
    pub fn new(data: Vec<T>, meta: Pagination) -> Self {
        Self { data, meta }
    }

    /// Map every row, keeping the metadata, failing on the first error.
    pub fn try_map<U, E, F>(self, f: F) -> Result<Page<U>, E>
    where
        F: FnMut(T) -> Result<U, E>,
    {
        let data = self.data.into_iter().map(f).collect::<Result<_, _>>()?;
        Ok(Page {
            data,
            meta: self.meta,
        })
    }
}
