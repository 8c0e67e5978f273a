//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};

use crate::config::PaginationConfig;

/// Request parameters for paginated queries.
///
/// `per_page` is optional so the configured default applies when the client
/// omits it.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-indexed).
    #[serde(default = "default_page")]
    pub page: u32,
    /// Number of items per page.
    #[serde(default)]
    pub per_page: Option<u32>,
}

fn default_page() -> u32 {
    1
}

impl PageRequest {
    /// Resolves the request against the configured limits.
    ///
    /// Page 0 is treated as page 1 and `per_page` is clamped to
    /// `1..=max_page_size`.
    #[must_use]
    pub fn resolve(self, limits: PaginationConfig) -> Page {
        let per_page = self
            .per_page
            .unwrap_or(limits.default_page_size)
            .clamp(1, limits.max_page_size.max(1));

        Page {
            page: self.page.max(1),
            per_page,
        }
    }
}

/// A page request after defaults and limits have been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// Page number (1-indexed).
    pub page: u32,
    /// Number of items per page.
    pub per_page: u32,
}

impl Page {
    /// Calculates the offset for database queries.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.per_page)
    }

    /// Returns the limit for database queries.
    #[must_use]
    pub fn limit(&self) -> u64 {
        u64::from(self.per_page)
    }

    /// Zero-based page index, as used by SeaORM paginators.
    #[must_use]
    pub fn index(&self) -> u64 {
        u64::from(self.page - 1)
    }
}

/// Response wrapper for paginated data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    /// The items in the current page.
    pub data: Vec<T>,
    /// Pagination metadata.
    pub meta: PageMeta,
}

/// Pagination metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageMeta {
    /// Current page number.
    pub page: u32,
    /// Items per page.
    pub per_page: u32,
    /// Total number of items across all pages.
    pub total: u64,
    /// Total number of pages.
    pub total_pages: u64,
}

impl<T> PageResponse<T> {
    /// Creates a new paginated response.
    #[must_use]
    pub fn new(data: Vec<T>, page: Page, total: u64) -> Self {
        let total_pages = if total == 0 {
            1
        } else {
            total.div_ceil(u64::from(page.per_page))
        };

        Self {
            data,
            meta: PageMeta {
                page: page.page,
                per_page: page.per_page,
                total,
                total_pages,
            },
        }
    }

    /// Maps the items while keeping the metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageResponse<U> {
        PageResponse {
            data: self.data.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}

#[cfg(test)]
#[path = "pagination_tests.rs"]
mod tests;
