//! Redis cache implementation

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::{AsyncCommands, Client};
use tokio::sync::OnceCell;

use crate::domain::DomainError;
use crate::domain::cache::Cache;

const CONNECT_RETRIES: usize = 2;

/// Configuration for Redis cache
#[derive(Debug, Clone)]
pub struct RedisCacheConfig {
    /// Redis connection URL (e.g., "redis://127.0.0.1:6379")
    pub url: String,
    /// Key prefix for namespacing
    pub key_prefix: Option<String>,
    /// Bound on each connect attempt and each command
    pub timeout: Duration,
}

impl RedisCacheConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            key_prefix: None,
            timeout: Duration::from_secs(1),
        }
    }

    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn prefix_key(&self, key: &str) -> String {
        match &self.key_prefix {
            Some(prefix) => format!("{}:{}", prefix, key),
            None => key.to_string(),
        }
    }

    fn manager_config(&self) -> ConnectionManagerConfig {
        ConnectionManagerConfig::new()
            .set_number_of_retries(CONNECT_RETRIES)
            .set_connection_timeout(self.timeout)
            .set_response_timeout(self.timeout)
    }
}

/// Shared cache on Redis; entries are written with `SET .. EX`.
///
/// The connection is opened on first use. Until Redis answers, every
/// operation fails with [`DomainError::Cache`] and the next one tries again.
pub struct RedisCache {
    client: Client,
    connection: OnceCell<ConnectionManager>,
    config: RedisCacheConfig,
}

impl fmt::Debug for RedisCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisCache")
            .field("config", &self.config)
            .field("connected", &self.connection.initialized())
            .finish()
    }
}

impl RedisCache {
    /// Fails only on an unusable URL; nothing is dialed yet
    pub fn new(config: RedisCacheConfig) -> Result<Self, DomainError> {
        let client = Client::open(config.url.as_str())
            .map_err(|e| DomainError::configuration(format!("Invalid Redis URL: {}", e)))?;

        Ok(Self {
            client,
            connection: OnceCell::new(),
            config,
        })
    }

    /// Round trip to the server, connecting first if needed
    pub async fn ping(&self) -> Result<(), DomainError> {
        let mut conn = self.connection().await?;

        redis::cmd("PING")
            .query_async::<String>(&mut conn)
            .await
            .map(|_| ())
            .map_err(|e| DomainError::cache(format!("Redis ping failed: {}", e)))
    }

    async fn connection(&self) -> Result<ConnectionManager, DomainError> {
        self.connection
            .get_or_try_init(|| {
                ConnectionManager::new_with_config(self.client.clone(), self.config.manager_config())
            })
            .await
            .cloned()
            .map_err(|e| DomainError::cache(format!("Failed to connect to Redis: {}", e)))
    }
}

#[async_trait]
impl Cache for RedisCache {
    async fn get_raw(&self, key: &str) -> Result<Option<String>, DomainError> {
        let mut conn = self.connection().await?;

        conn.get(self.config.prefix_key(key))
            .await
            .map_err(|e| DomainError::cache(format!("Failed to get key '{}': {}", key, e)))
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> Result<(), DomainError> {
        let mut conn = self.connection().await?;
        let ttl_secs = ttl.as_secs().max(1);

        let _: () = conn
            .set_ex(self.config.prefix_key(key), value, ttl_secs)
            .await
            .map_err(|e| DomainError::cache(format!("Failed to set key '{}': {}", key, e)))?;

        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool, DomainError> {
        let mut conn = self.connection().await?;

        conn.exists(self.config.prefix_key(key)).await.map_err(|e| {
            DomainError::cache(format!("Failed to check existence of key '{}': {}", key, e))
        })
    }

    async fn ttl(&self, key: &str) -> Result<Option<Duration>, DomainError> {
        let mut conn = self.connection().await?;

        let ttl_secs: i64 = conn
            .ttl(self.config.prefix_key(key))
            .await
            .map_err(|e| DomainError::cache(format!("Failed to get TTL for key '{}': {}", key, e)))?;

        // -2: no such key, -1: no expiry
        if ttl_secs < 0 {
            Ok(None)
        } else {
            Ok(Some(Duration::from_secs(ttl_secs as u64)))
        }
    }

    async fn size(&self) -> Result<usize, DomainError> {
        let mut conn = self.connection().await?;

        if self.config.key_prefix.is_none() {
            return redis::cmd("DBSIZE")
                .query_async(&mut conn)
                .await
                .map_err(|e| DomainError::cache(format!("Failed to get database size: {}", e)));
        }

        let pattern = self.config.prefix_key("*");
        let mut cursor = 0u64;
        let mut count = 0usize;

        loop {
            let (next, keys): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(1000)
                .query_async(&mut conn)
                .await
                .map_err(|e| DomainError::cache(format!("Failed to scan keys: {}", e)))?;

            count += keys.len();
            cursor = next;

            if cursor == 0 {
                break;
            }
        }

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cache::CacheExt;

    fn test_config() -> RedisCacheConfig {
        RedisCacheConfig::new("redis://127.0.0.1:6379").with_key_prefix("catalog-test")
    }

    fn unreachable_config() -> RedisCacheConfig {
        RedisCacheConfig::new("redis://127.0.0.1:1").with_timeout(Duration::from_millis(200))
    }

    #[test]
    fn test_prefix_key() {
        assert_eq!(test_config().prefix_key("vendor:1"), "catalog-test:vendor:1");
        assert_eq!(
            RedisCacheConfig::new("redis://localhost").prefix_key("vendor:1"),
            "vendor:1"
        );
    }

    #[test]
    fn test_invalid_url_is_configuration_error() {
        let result = RedisCache::new(RedisCacheConfig::new("not a url"));
        assert!(matches!(result, Err(DomainError::Configuration { .. })));
    }

    #[tokio::test]
    async fn test_unreachable_server_fails_each_operation() {
        let cache = RedisCache::new(unreachable_config()).unwrap();

        let read = cache.get_raw("categories:root").await;
        assert!(matches!(read, Err(DomainError::Cache { .. })));

        let write = cache
            .set_raw("categories:root", "[]", Duration::from_secs(60))
            .await;
        assert!(matches!(write, Err(DomainError::Cache { .. })));

        assert!(cache.ping().await.is_err());
        assert!(!cache.connection.initialized());
    }

    #[tokio::test]
    #[ignore = "Requires running Redis instance"]
    async fn test_redis_set_get_with_ttl() {
        let cache = RedisCache::new(test_config()).unwrap();

        cache
            .set("categories:root", &vec!["c1"], Duration::from_secs(60))
            .await
            .unwrap();

        let result: Option<Vec<String>> = cache.get("categories:root").await.unwrap();
        assert_eq!(result, Some(vec!["c1".to_string()]));

        let ttl = cache.ttl("categories:root").await.unwrap().unwrap();
        assert!(ttl.as_secs() > 50);
    }

    #[tokio::test]
    #[ignore = "Requires running Redis instance"]
    async fn test_redis_null_is_stored() {
        let cache = RedisCache::new(test_config()).unwrap();
        let nothing: Option<String> = None;

        cache
            .set("product:missing", &nothing, Duration::from_secs(60))
            .await
            .unwrap();

        assert!(cache.exists("product:missing").await.unwrap());
        let result: Option<Option<String>> = cache.get("product:missing").await.unwrap();
        assert_eq!(result, Some(None));
    }
}
