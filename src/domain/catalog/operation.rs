//! Upstream catalog operations

use std::fmt;

use serde::{Deserialize, Serialize};

/// Operations exposed by the upstream catalog provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpstreamOperation {
    GetRootCategoryInfoList,
    GetCategorySubcategoryInfoList,
    BatchSearchItemsFrame,
    BatchGetItemFullInfo,
    GetVendorInfo,
    SearchRatingListItems,
}

impl UpstreamOperation {
    /// Path segment appended to the provider base URL
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GetRootCategoryInfoList => "GetRootCategoryInfoList",
            Self::GetCategorySubcategoryInfoList => "GetCategorySubcategoryInfoList",
            Self::BatchSearchItemsFrame => "BatchSearchItemsFrame",
            Self::BatchGetItemFullInfo => "BatchGetItemFullInfo",
            Self::GetVendorInfo => "GetVendorInfo",
            Self::SearchRatingListItems => "SearchRatingListItems",
        }
    }

    /// Message reported when the provider gives no description of its own
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::GetRootCategoryInfoList => "Failed to fetch categories from provider",
            Self::GetCategorySubcategoryInfoList => "Failed to fetch subcategories from provider",
            Self::BatchSearchItemsFrame => "Failed to fetch products from provider",
            Self::BatchGetItemFullInfo => "Failed to fetch product info",
            Self::GetVendorInfo => "Failed to fetch vendor info",
            Self::SearchRatingListItems => "Failed to fetch popular products from provider",
        }
    }

    /// Whether a missing `ErrorCode` counts as a failure.
    ///
    /// The ratings search only fails on a present, truthy, non-`Ok` code.
    pub fn requires_ok_code(&self) -> bool {
        !matches!(self, Self::SearchRatingListItems)
    }
}

impl fmt::Display for UpstreamOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_path_segments() {
        assert_eq!(
            UpstreamOperation::GetRootCategoryInfoList.as_str(),
            "GetRootCategoryInfoList"
        );
        assert_eq!(
            UpstreamOperation::SearchRatingListItems.to_string(),
            "SearchRatingListItems"
        );
    }

    #[test]
    fn test_only_ratings_search_is_lenient() {
        assert!(UpstreamOperation::BatchSearchItemsFrame.requires_ok_code());
        assert!(UpstreamOperation::GetVendorInfo.requires_ok_code());
        assert!(!UpstreamOperation::SearchRatingListItems.requires_ok_code());
    }
}
