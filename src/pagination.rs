//! Offset/limit pagination for list queries.
//!
//! [`Paginator`] carries the configured default page size and turns a total
//! row count plus the caller's requested `limit`/`page` into [`Metadata`].

use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Page size used when no configuration value is supplied.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 20;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaginationError {
    #[error("invalid default page size '{0}'")]
    InvalidDefaultPageSize(String),
}

/// Derived pagination descriptor for a single list request.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub struct Metadata {
    pub total: usize,
    pub page: usize,
    pub limit: usize,
    pub total_pages: usize,
    #[serde(skip)]
    offset: usize,
}

impl Metadata {
    /// Normalizes the requested page and limit and computes offset and page count.
    ///
    /// A non-positive `limit` falls back to `default_page_size`, a non-positive
    /// `page` falls back to the first page.
    pub fn new(total: usize, limit: i64, page: i64, default_page_size: usize) -> Self {
        let limit = usize::try_from(limit)
            .ok()
            .filter(|limit| *limit > 0)
            .unwrap_or(default_page_size)
            .max(1);
        let page = usize::try_from(page)
            .ok()
            .filter(|page| *page > 0)
            .unwrap_or(1);

        Self {
            total,
            page,
            limit,
            total_pages: total.div_ceil(limit),
            offset: (page - 1).saturating_mul(limit),
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

/// Pagination engine bound to the configured default page size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Paginator {
    default_page_size: usize,
}

impl Paginator {
    pub fn new(default_page_size: usize) -> Result<Self, PaginationError> {
        if default_page_size == 0 {
            return Err(PaginationError::InvalidDefaultPageSize(
                default_page_size.to_string(),
            ));
        }
        Ok(Self { default_page_size })
    }

    /// Parses the textual configuration value of the default page size.
    pub fn from_setting(raw: &str) -> Result<Self, PaginationError> {
        raw.parse()
    }

    pub fn default_page_size(&self) -> usize {
        self.default_page_size
    }

    pub fn metadata(&self, total: usize, limit: i64, page: i64) -> Metadata {
        Metadata::new(total, limit, page, self.default_page_size)
    }
}

impl Default for Paginator {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_ITEMS_PER_PAGE,
        }
    }
}

impl FromStr for Paginator {
    type Err = PaginationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let size = s
            .trim()
            .parse::<usize>()
            .map_err(|_| PaginationError::InvalidDefaultPageSize(s.to_string()))?;
        Self::new(size)
    }
}
