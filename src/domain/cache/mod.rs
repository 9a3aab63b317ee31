//! Cache domain - Key-value store abstraction and catalog cache keys

mod key;
mod repository;

pub use key::CatalogCacheKey;
pub use repository::{Cache, CacheExt};

#[cfg(test)]
pub use repository::mock::MockCache;
