//! Paginated product listings

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Product;

/// One page of items as normalized from a provider search
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemFrame {
    pub items: Vec<Product>,
    pub total_count: u64,
    pub maximum_page_count: u64,
    pub available_search_methods: Vec<Value>,
}

/// Pagination metadata returned with product listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMeta {
    pub page: i64,
    pub limit: i64,
    pub total: u64,
    pub total_pages: u64,
    pub maximum_page_count: u64,
}

impl ListMeta {
    pub fn new(page: i64, limit: i64, total: u64, maximum_page_count: u64) -> Self {
        Self {
            page,
            limit,
            total,
            total_pages: total_pages(total, limit),
            maximum_page_count,
        }
    }
}

/// Search refinements offered by the provider
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFilters {
    pub available_search_methods: Vec<Value>,
}

/// Product listing as served to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductListResult {
    pub meta: ListMeta,
    pub filters: ListFilters,
    pub data: Vec<Product>,
}

impl ProductListResult {
    /// Builds a listing for the given page index and page size
    pub fn from_frame(frame: ItemFrame, page: i64, limit: i64) -> Self {
        Self {
            meta: ListMeta::new(page, limit, frame.total_count, frame.maximum_page_count),
            filters: ListFilters {
                available_search_methods: frame.available_search_methods,
            },
            data: frame.items,
        }
    }
}

/// Number of pages needed for `total` items at `limit` per page.
/// Zero when `limit` is not positive.
pub fn total_pages(total: u64, limit: i64) -> u64 {
    if limit <= 0 {
        return 0;
    }

    total.div_ceil(limit as u64)
}
