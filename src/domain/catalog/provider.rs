//! Catalog provider trait

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::{Category, ItemFrame, Product, UpstreamError, Vendor};

/// What a product search frame is filtered by
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemQuery {
    /// Items filed under a category
    Category(String),
    /// Free-text title search
    Title(String),
}

/// Source of truth for catalog data.
///
/// Implementations talk to the upstream provider and normalize its
/// envelope; they never cache and never retry.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Lists top-level categories as returned by the provider
    async fn root_categories(&self) -> Result<Vec<Category>, UpstreamError>;

    /// Lists direct children of a category
    async fn subcategories(&self, parent_id: &str) -> Result<Vec<Category>, UpstreamError>;

    /// Fetches one frame of a product search starting at `position`
    async fn search_items(
        &self,
        query: &ItemQuery,
        position: i64,
        size: i64,
    ) -> Result<ItemFrame, UpstreamError>;

    /// Fetches one frame of the popularity rating list starting at record `offset`
    async fn popular_items(&self, offset: i64, size: i64) -> Result<ItemFrame, UpstreamError>;

    /// Fetches a single item; `None` when the provider has no such item
    async fn item(&self, item_id: &str) -> Result<Option<Product>, UpstreamError>;

    /// Fetches vendor information; `None` when unknown
    async fn vendor(&self, vendor_id: &str) -> Result<Option<Vendor>, UpstreamError>;
}
