//! Success envelope shared by every catalog endpoint

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::domain::{ListFilters, ListMeta, Product, ProductListResult};

/// `{"success": true, "message", "meta"?, "filters"?, "data"}`
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ListMeta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<ListFilters>,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            meta: None,
            filters: None,
            data,
        }
    }
}

impl ApiResponse<Vec<Product>> {
    /// Product listing with its pagination meta and search filters
    pub fn listing(message: impl Into<String>, result: ProductListResult) -> Self {
        Self {
            success: true,
            message: message.into(),
            meta: Some(result.meta),
            filters: Some(result.filters),
            data: result.data,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ItemFrame;
    use serde_json::json;

    #[test]
    fn test_plain_response_omits_meta() {
        let response = ApiResponse::ok("Vendor info fetched successfully", json!(null));
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(
            value,
            json!({
                "success": true,
                "message": "Vendor info fetched successfully",
                "data": null
            })
        );
    }

    #[test]
    fn test_listing_response_shape() {
        let frame = ItemFrame {
            items: vec![Product::new("p1", "Kettle")],
            total_count: 95,
            maximum_page_count: 4,
            available_search_methods: vec![json!({"Provider": "Taobao"})],
        };
        let response = ApiResponse::listing(
            "Products fetched successfully",
            ProductListResult::from_frame(frame, 0, 10),
        );

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value["meta"],
            json!({"page": 0, "limit": 10, "total": 95, "totalPages": 10, "maximumPageCount": 4})
        );
        assert_eq!(value["filters"]["availableSearchMethods"][0]["Provider"], "Taobao");
        assert_eq!(value["data"][0]["Id"], "p1");
    }
}
