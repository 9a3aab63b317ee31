//! Cached catalog service

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::{
    Cache, CacheExt, CatalogCacheKey, CatalogProvider, Category, CategoryWithSubcategories,
    ItemQuery, Product, ProductListResult, UpstreamError, Vendor,
};

/// Lifetime of every catalog cache entry (72 hours)
pub const CATALOG_CACHE_TTL: Duration = Duration::from_secs(72 * 60 * 60);

const POPULAR_MAX_SIZE: i64 = 100;

/// Cache-aside front for the catalog provider.
///
/// Successful provider results are cached for [`CATALOG_CACHE_TTL`];
/// failures are never cached. A cache that cannot be read or written is
/// bypassed, so requests still succeed as long as the provider does.
#[derive(Clone)]
pub struct CatalogService {
    provider: Arc<dyn CatalogProvider>,
    cache: Arc<dyn Cache>,
    ttl: Duration,
}

impl std::fmt::Debug for CatalogService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogService")
            .field("cache", &self.cache)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl CatalogService {
    pub fn new(provider: Arc<dyn CatalogProvider>, cache: Arc<dyn Cache>) -> Self {
        Self {
            provider,
            cache,
            ttl: CATALOG_CACHE_TTL,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Visible top-level categories
    pub async fn root_categories(&self) -> Result<Vec<Category>, UpstreamError> {
        self.cached(CatalogCacheKey::RootCategories, move || async move {
            self.provider.root_categories().await.map(visible)
        })
        .await
    }

    /// Visible children of a category
    pub async fn subcategories(&self, parent_id: &str) -> Result<Vec<Category>, UpstreamError> {
        self.cached(CatalogCacheKey::Subcategories(parent_id), move || async move {
            self.provider.subcategories(parent_id).await.map(visible)
        })
        .await
    }

    /// Products filed under a category. `page` is sent as the frame position.
    pub async fn products_by_category(
        &self,
        category_id: &str,
        page: i64,
        size: i64,
    ) -> Result<ProductListResult, UpstreamError> {
        let query = ItemQuery::Category(category_id.to_string());
        self.search(category_id, &query, page, size).await
    }

    /// Products whose title matches `keyword`
    pub async fn products_by_title(
        &self,
        keyword: &str,
        page: i64,
        size: i64,
    ) -> Result<ProductListResult, UpstreamError> {
        let query = ItemQuery::Title(keyword.to_string());
        self.search(keyword, &query, page, size).await
    }

    /// Popular products by 0-based page index.
    ///
    /// The page is clamped to `>= 0` and the size to `1..=100`; the
    /// provider is asked for the record offset `page * size`.
    pub async fn popular_products(
        &self,
        page: i64,
        size: i64,
    ) -> Result<ProductListResult, UpstreamError> {
        let page = page.max(0);
        let size = size.clamp(1, POPULAR_MAX_SIZE);
        let offset = page.saturating_mul(size);

        self.cached(CatalogCacheKey::Popular { page, size }, move || async move {
            let frame = self.provider.popular_items(offset, size).await?;
            Ok(ProductListResult::from_frame(frame, page, size))
        })
        .await
    }

    /// Full item info; `None` (cached as well) when the provider has no such item
    pub async fn product(&self, item_id: &str) -> Result<Option<Product>, UpstreamError> {
        self.cached(CatalogCacheKey::Product(item_id), move || async move {
            self.provider.item(item_id).await
        })
        .await
    }

    pub async fn vendor(&self, vendor_id: &str) -> Result<Option<Vendor>, UpstreamError> {
        self.cached(CatalogCacheKey::Vendor(vendor_id), move || async move {
            self.provider.vendor(vendor_id).await
        })
        .await
    }

    /// Root categories, each with its subcategories.
    ///
    /// Subcategories are fetched concurrently through the cache. A branch
    /// that fails ends up with no subcategories instead of failing the
    /// whole listing; a failure to list the roots is returned as is.
    pub async fn categories_with_subcategories(
        &self,
    ) -> Result<Vec<CategoryWithSubcategories>, UpstreamError> {
        let roots = self.root_categories().await?;

        let branches = roots.iter().map(|category| async move {
            match category.id() {
                Some(id) => self.subcategories(&id).await,
                None => Ok(Vec::new()),
            }
        });
        let children = join_all(branches).await;

        Ok(roots
            .into_iter()
            .zip(children)
            .map(|(category, subcategories)| {
                let subcategories = subcategories.unwrap_or_else(|e| {
                    warn!(
                        category_id = ?category.id(),
                        error = %e,
                        "Failed to fetch subcategories, returning category without them"
                    );
                    Vec::new()
                });

                CategoryWithSubcategories {
                    category,
                    subcategories,
                }
            })
            .collect())
    }

    async fn search(
        &self,
        scope: &str,
        query: &ItemQuery,
        page: i64,
        size: i64,
    ) -> Result<ProductListResult, UpstreamError> {
        self.cached(CatalogCacheKey::Products { scope, page, size }, move || async move {
            let frame = self.provider.search_items(query, page, size).await?;
            Ok(ProductListResult::from_frame(frame, page, size))
        })
        .await
    }

    async fn cached<T, F, Fut>(
        &self,
        key: CatalogCacheKey<'_>,
        fetch: F,
    ) -> Result<T, UpstreamError>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, UpstreamError>>,
    {
        let key = key.to_string();

        let cached: Result<Option<T>, _> = self.cache.get(&key).await;

        match cached {
            Ok(Some(value)) => {
                debug!(key = %key, "Catalog cache hit");
                return Ok(value);
            }
            Ok(None) => debug!(key = %key, "Catalog cache miss"),
            Err(e) => warn!(key = %key, error = %e, "Catalog cache unavailable, using provider"),
        }

        let value = fetch().await?;

        if let Err(e) = self.cache.set(&key, &value, self.ttl).await {
            warn!(key = %key, error = %e, "Failed to store catalog entry");
        }

        Ok(value)
    }
}

fn visible(mut categories: Vec<Category>) -> Vec<Category> {
    categories.retain(Category::is_visible);
    categories
}
