//! Cache infrastructure - Cache backends

mod factory;
mod in_memory;
mod redis;

pub use factory::{CacheFactory, CacheType};
pub use in_memory::{InMemoryCache, InMemoryCacheConfig};
pub use redis::{RedisCache, RedisCacheConfig};
