//! Pagination utilities for service layer
//!
//! `Pagination` holds a validated 1-based page and page size; `PageMeta`
//! is what listing endpoints report back next to the items.

use serde::Serialize;

use crate::errors::ServiceError;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;
pub const MAX_PAGE_SIZE: u64 = 100;

/// Pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page index
    pub page: u64,
    /// items per page
    pub limit: u64,
}

impl Pagination {
    /// Build from raw request values. `page < 1` and `limit < 1` are input
    /// errors; `limit` above `MAX_PAGE_SIZE` is clamped.
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Result<Self, ServiceError> {
        let page = page.unwrap_or(DEFAULT_PAGE as i64);
        let limit = limit.unwrap_or(DEFAULT_LIMIT as i64);
        if page < 1 {
            return Err(ServiceError::validation("page must be >= 1"));
        }
        if limit < 1 {
            return Err(ServiceError::validation("limit must be >= 1"));
        }
        Ok(Self { page: page as u64, limit: (limit as u64).min(MAX_PAGE_SIZE) })
    }

    /// Rows to skip before the requested page.
    pub fn offset(self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    pub fn meta(self, total: u64) -> PageMeta {
        PageMeta { total, page: self.page, limit: self.limit, total_pages: total.div_ceil(self.limit) }
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: DEFAULT_PAGE, limit: DEFAULT_LIMIT } }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

/// One page of results.
#[derive(Clone, Debug, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}
