//! Cache factory for runtime selection

use std::sync::Arc;

use tracing::warn;

use crate::config::CacheSettings;
use crate::domain::DomainError;
use crate::domain::cache::Cache;

use super::in_memory::{InMemoryCache, InMemoryCacheConfig};
use super::redis::{RedisCache, RedisCacheConfig};

/// Supported cache backends
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CacheType {
    /// In-memory cache using moka
    #[default]
    InMemory,
    /// Redis cache
    Redis,
}

impl std::fmt::Display for CacheType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheType::InMemory => write!(f, "in_memory"),
            CacheType::Redis => write!(f, "redis"),
        }
    }
}

impl std::str::FromStr for CacheType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "in_memory" | "inmemory" | "memory" => Ok(CacheType::InMemory),
            "redis" => Ok(CacheType::Redis),
            _ => Err(DomainError::configuration(format!(
                "Unknown cache type: {}. Valid types: in_memory, redis",
                s
            ))),
        }
    }
}

/// Builds the configured cache backend
#[derive(Debug, Default)]
pub struct CacheFactory;

impl CacheFactory {
    pub fn new() -> Self {
        Self
    }

    pub async fn create(&self, settings: &CacheSettings) -> Result<Arc<dyn Cache>, DomainError> {
        let cache_type: CacheType = settings.backend.parse()?;

        match cache_type {
            CacheType::InMemory => {
                let config = InMemoryCacheConfig::default().with_max_capacity(settings.max_capacity);
                Ok(Arc::new(InMemoryCache::with_config(config)))
            }
            CacheType::Redis => {
                let url = settings.redis_url.clone().ok_or_else(|| {
                    DomainError::configuration("cache.redis_url is required for the redis backend")
                })?;

                let mut config = RedisCacheConfig::new(url).with_timeout(settings.redis_timeout());

                if let Some(prefix) = &settings.key_prefix {
                    config = config.with_key_prefix(prefix.clone());
                }

                let cache = RedisCache::new(config)?;
                if let Err(e) = cache.ping().await {
                    warn!(error = %e, "Redis unreachable, catalog reads go to the provider until it recovers");
                }

                Ok(Arc::new(cache))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cache::CacheExt;
    use std::time::Duration;

    #[test]
    fn test_cache_type_from_str() {
        assert_eq!("in_memory".parse::<CacheType>().unwrap(), CacheType::InMemory);
        assert_eq!("memory".parse::<CacheType>().unwrap(), CacheType::InMemory);
        assert_eq!("REDIS".parse::<CacheType>().unwrap(), CacheType::Redis);
        assert!("memcached".parse::<CacheType>().is_err());
    }

    #[test]
    fn test_cache_type_display() {
        assert_eq!(CacheType::InMemory.to_string(), "in_memory");
        assert_eq!(CacheType::Redis.to_string(), "redis");
    }

    #[tokio::test]
    async fn test_factory_create_in_memory() {
        let cache = CacheFactory::new()
            .create(&CacheSettings::default())
            .await
            .unwrap();

        cache
            .set("test", &"value", Duration::from_secs(60))
            .await
            .unwrap();

        let result: Option<String> = cache.get("test").await.unwrap();
        assert_eq!(result, Some("value".to_string()));
    }

    #[tokio::test]
    async fn test_factory_redis_requires_url() {
        let settings = CacheSettings {
            backend: "redis".to_string(),
            redis_url: None,
            ..Default::default()
        };

        let result = CacheFactory::new().create(&settings).await;
        assert!(matches!(result, Err(DomainError::Configuration { .. })));
    }

    #[tokio::test]
    async fn test_factory_starts_with_unreachable_redis() {
        let settings = CacheSettings {
            backend: "redis".to_string(),
            redis_url: Some("redis://127.0.0.1:1".to_string()),
            redis_timeout_ms: 200,
            ..Default::default()
        };

        let cache = CacheFactory::new().create(&settings).await.unwrap();

        let result: Result<Option<String>, _> = cache.get("categories:root").await;
        assert!(matches!(result, Err(DomainError::Cache { .. })));
    }
}
