//! Catalog endpoint handlers

use axum::extract::{Path, State};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, ApiResponse, PageQuery, Query, SearchQuery};
use crate::domain::{Category, CategoryWithSubcategories, Product, Vendor};

const DEFAULT_PAGE_SIZE: i64 = 10;
const DEFAULT_POPULAR_PAGE_SIZE: i64 = 40;

/// GET /api/v1/products/categories
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<Category>>, ApiError> {
    debug!("Listing root categories");

    let categories = state.catalog_service.root_categories().await?;

    Ok(ApiResponse::ok("Categories fetched successfully", categories))
}

/// GET /api/v1/products/categories/{id}/subcategories
pub async fn list_subcategories(
    State(state): State<AppState>,
    Path(category_id): Path<String>,
) -> Result<ApiResponse<Vec<Category>>, ApiError> {
    debug!(category_id = %category_id, "Listing subcategories");

    let categories = state.catalog_service.subcategories(&category_id).await?;

    Ok(ApiResponse::ok("Subcategories fetched successfully", categories))
}

/// GET /api/v1/products/categories-with-subcategories
pub async fn list_categories_with_subcategories(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<CategoryWithSubcategories>>, ApiError> {
    let tree = state.catalog_service.categories_with_subcategories().await?;

    Ok(ApiResponse::ok(
        "Categories with subcategories fetched successfully",
        tree,
    ))
}

/// GET /api/v1/products/categories/{id}/products
pub async fn list_category_products(
    State(state): State<AppState>,
    Path(category_id): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<ApiResponse<Vec<Product>>, ApiError> {
    let (page, size) = query.resolve(DEFAULT_PAGE_SIZE);
    debug!(category_id = %category_id, page, size, "Listing category products");

    let result = state
        .catalog_service
        .products_by_category(&category_id, page, size)
        .await?;

    Ok(ApiResponse::listing("Products fetched successfully", result))
}

/// GET /api/v1/products/search
pub async fn search_products(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<ApiResponse<Vec<Product>>, ApiError> {
    let keyword = query
        .keyword()
        .ok_or_else(|| ApiError::bad_request("Search keyword is required"))?;
    let page = query.page.unwrap_or(0);
    let size = query.size.unwrap_or(DEFAULT_PAGE_SIZE);

    debug!(keyword = %keyword, page, size, "Searching products");

    let result = state
        .catalog_service
        .products_by_title(keyword, page, size)
        .await?;

    Ok(ApiResponse::listing("Products fetched successfully", result))
}

/// GET /api/v1/products/popular
pub async fn list_popular_products(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<ApiResponse<Vec<Product>>, ApiError> {
    let (page, size) = query.resolve(DEFAULT_POPULAR_PAGE_SIZE);

    let result = state.catalog_service.popular_products(page, size).await?;

    Ok(ApiResponse::listing(
        "Popular products fetched successfully",
        result,
    ))
}

/// GET /api/v1/products/single/{id}
pub async fn get_product(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
) -> Result<ApiResponse<Option<Product>>, ApiError> {
    debug!(item_id = %item_id, "Getting product");

    let product = state.catalog_service.product(&item_id).await?;

    Ok(ApiResponse::ok("Product details fetched successfully", product))
}

/// GET /api/v1/products/vendors/{id}
pub async fn get_vendor(
    State(state): State<AppState>,
    Path(vendor_id): Path<String>,
) -> Result<ApiResponse<Option<Vendor>>, ApiError> {
    debug!(vendor_id = %vendor_id, "Getting vendor");

    let vendor = state.catalog_service.vendor(&vendor_id).await?;

    Ok(ApiResponse::ok("Vendor info fetched successfully", vendor))
}
