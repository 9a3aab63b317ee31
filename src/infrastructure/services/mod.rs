//! Infrastructure services

mod catalog_service;

pub use catalog_service::{CatalogService, CATALOG_CACHE_TTL};
