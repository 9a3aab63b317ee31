//! Domain layer - Catalog entities, provider seam and cache abstraction

pub mod cache;
pub mod catalog;
pub mod error;

pub use cache::{Cache, CacheExt, CatalogCacheKey};
pub use catalog::{
    CatalogProvider, Category, CategoryWithSubcategories, ItemFrame, ItemQuery, ListFilters,
    ListMeta, Product, ProductListResult, UpstreamError, UpstreamErrorKind, UpstreamOperation,
    Vendor,
};
pub use error::DomainError;

#[cfg(test)]
pub use catalog::MockCatalogProvider;
