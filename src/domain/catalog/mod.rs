//! Catalog domain - Categories, products and vendors served through the gateway

mod entity;
mod error;
mod listing;
mod operation;
mod provider;

pub use entity::{Category, CategoryWithSubcategories, Product, Vendor};
pub use error::{UpstreamError, UpstreamErrorKind};
pub use listing::{total_pages, ItemFrame, ListFilters, ListMeta, ProductListResult};
pub use operation::UpstreamOperation;
pub use provider::{CatalogProvider, ItemQuery};

#[cfg(test)]
pub use provider::MockCatalogProvider;
