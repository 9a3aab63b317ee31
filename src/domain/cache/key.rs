//! Cache keys for catalog resources

use std::fmt;

/// Cache key for one catalog resource.
///
/// Pagination values are rendered exactly as received, so differently
/// spelled requests get their own entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CatalogCacheKey<'a> {
    RootCategories,
    Subcategories(&'a str),
    /// Product search; the scope is a category id or a free-text keyword
    Products { scope: &'a str, page: i64, size: i64 },
    Popular { page: i64, size: i64 },
    Product(&'a str),
    Vendor(&'a str),
}

impl fmt::Display for CatalogCacheKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RootCategories => write!(f, "categories:root"),
            Self::Subcategories(id) => write!(f, "subcategories:{}", id),
            Self::Products { scope, page, size } => {
                write!(f, "products:{}:page={}:size={}", scope, page, size)
            }
            Self::Popular { page, size } => write!(f, "popular:page={}:size={}", page, size),
            Self::Product(id) => write!(f, "product:{}", id),
            Self::Vendor(id) => write!(f, "vendor:{}", id),
        }
    }
}
