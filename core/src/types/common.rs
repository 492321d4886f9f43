use serde::{Deserialize, Serialize};

use crate::endpoint::Endpoint;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;
/// Largest page size the server accepts.
pub const MAX_LIMIT: u32 = 100;

/// Page selection for list endpoints.
///
/// `page` defaults to 1 and `limit` to 10; `limit` is clamped to `MAX_LIMIT`.
/// The page number is passed through untouched, including 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl ListParams {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
        }
    }

    pub fn page(&self) -> u32 {
        self.page.unwrap_or(DEFAULT_PAGE)
    }

    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT)
    }

    pub(crate) fn apply(&self, endpoint: Endpoint) -> Endpoint {
        endpoint.query("page", self.page()).query("limit", self.limit())
    }
}

/// One page of a list response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub total_pages: u32,
}

impl Pagination {
    pub fn has_next_page(&self) -> bool {
        self.page < self.total_pages
    }
}
