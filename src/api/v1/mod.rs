//! v1 API endpoints

pub mod products;

use axum::{routing::get, Router};

use super::state::AppState;

/// Create v1 API router
pub fn create_v1_router() -> Router<AppState> {
    Router::new().nest("/products", create_products_router())
}

/// Catalog routes, mounted under `/products`
pub fn create_products_router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(products::list_categories))
        .route(
            "/categories/{id}/subcategories",
            get(products::list_subcategories),
        )
        .route(
            "/categories/{id}/products",
            get(products::list_category_products),
        )
        .route(
            "/categories-with-subcategories",
            get(products::list_categories_with_subcategories),
        )
        .route("/search", get(products::search_products))
        .route("/popular", get(products::list_popular_products))
        .route("/single/{id}", get(products::get_product))
        .route("/vendors/{id}", get(products::get_vendor))
}
