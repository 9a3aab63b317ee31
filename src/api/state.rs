//! Application state for shared services

use std::sync::Arc;

use crate::domain::Cache;
use crate::infrastructure::services::CatalogService;

/// Application state shared by all handlers
#[derive(Clone, Debug)]
pub struct AppState {
    pub catalog_service: Arc<CatalogService>,
    /// Backend behind the catalog service; probed by the readiness check
    pub cache: Arc<dyn Cache>,
}

impl AppState {
    pub fn new(catalog_service: Arc<CatalogService>, cache: Arc<dyn Cache>) -> Self {
        Self {
            catalog_service,
            cache,
        }
    }
}
