//! Storefront Catalog Gateway
//!
//! A cached proxy in front of a third-party product catalog provider:
//! - Categories, subcategories and a category tree
//! - Product search by category or title, popular products
//! - Product and vendor details
//! - Cache-aside with a 72h TTL on moka or Redis

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use domain::CatalogProvider;
use infrastructure::{
    cache::CacheFactory,
    catalog::{HttpClient, OtapiClient},
    services::CatalogService,
};
use tracing::info;

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let cache = CacheFactory::new().create(&config.cache).await?;
    info!(backend = %config.cache.backend, "Catalog cache initialized");

    let http = match config.upstream.timeout() {
        Some(timeout) => HttpClient::with_timeout(timeout)?,
        None => HttpClient::new(),
    };
    let provider: Arc<dyn CatalogProvider> = Arc::new(OtapiClient::new(http, &config.upstream));

    let catalog_service = Arc::new(CatalogService::new(provider, cache.clone()));

    Ok(AppState::new(catalog_service, cache))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UpstreamConfig;
    use crate::domain::Cache;

    #[tokio::test]
    async fn test_create_app_state_with_in_memory_cache() {
        let mut config = AppConfig::default();
        config.upstream = UpstreamConfig::new("http://localhost:9", "test-instance");

        let state = create_app_state_with_config(&config).await.unwrap();
        assert_eq!(state.cache.size().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_unreachable_redis_passes_through_to_provider() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/service-json/GetRootCategoryInfoList"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ErrorCode": "Ok",
                "CategoryInfoList": {"Content": [{"Id": "c1", "Name": "Home"}]}
            })))
            .expect(2)
            .mount(&server)
            .await;

        let mut config = AppConfig::default();
        config.upstream =
            UpstreamConfig::new(format!("{}/service-json", server.uri()), "test-instance");
        config.cache.backend = "redis".to_string();
        config.cache.redis_url = Some("redis://127.0.0.1:1".to_string());
        config.cache.redis_timeout_ms = 200;

        let state = create_app_state_with_config(&config).await.unwrap();

        for _ in 0..2 {
            let categories = state.catalog_service.root_categories().await.unwrap();
            assert_eq!(categories[0].id().as_deref(), Some("c1"));
        }
    }

    #[tokio::test]
    async fn test_create_app_state_rejects_unknown_backend() {
        let mut config = AppConfig::default();
        config.cache.backend = "memcached".to_string();

        assert!(create_app_state_with_config(&config).await.is_err());
    }
}
