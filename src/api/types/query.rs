//! Query string extraction

use axum::{
    extract::{FromRequestParts, Query as AxumQuery},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::error::ApiError;

/// Query string extractor that reports rejections in the API error format
#[derive(Debug, Clone, Copy, Default)]
pub struct Query<T>(pub T);

impl<S, T> FromRequestParts<S> for Query<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match AxumQuery::<T>::from_request_parts(parts, state).await {
            Ok(AxumQuery(value)) => Ok(Query(value)),
            Err(rejection) => Err(ApiError::bad_request(format!(
                "Invalid query string: {}",
                rejection.body_text()
            ))),
        }
    }
}

/// `page`/`size` pagination; `framePosition`/`frameSize` are accepted too
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    #[serde(default, alias = "framePosition")]
    pub page: Option<i64>,
    #[serde(default, alias = "frameSize")]
    pub size: Option<i64>,
}

impl PageQuery {
    /// Page and size, falling back to page 0 and `default_size`
    pub fn resolve(&self, default_size: i64) -> (i64, i64) {
        (self.page.unwrap_or(0), self.size.unwrap_or(default_size))
    }
}

/// Free-text product search
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default, alias = "title")]
    pub keyword: Option<String>,
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub size: Option<i64>,
}

impl SearchQuery {
    /// The keyword, unless it is missing or blank
    pub fn keyword(&self) -> Option<&str> {
        self.keyword.as_deref().filter(|k| !k.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract<T: DeserializeOwned>(uri: &str) -> Result<T, ApiError> {
        let (mut parts, _) = Request::builder().uri(uri).body(()).unwrap().into_parts();
        Query::<T>::from_request_parts(&mut parts, &())
            .await
            .map(|Query(value)| value)
    }

    #[tokio::test]
    async fn test_page_query_defaults() {
        let query: PageQuery = extract("/popular").await.unwrap();
        assert_eq!(query.resolve(40), (0, 40));
    }

    #[tokio::test]
    async fn test_page_query_aliases() {
        let query: PageQuery = extract("/products?framePosition=3&frameSize=25").await.unwrap();
        assert_eq!(query.resolve(10), (3, 25));
    }

    #[tokio::test]
    async fn test_page_query_rejects_non_numbers() {
        let err = extract::<PageQuery>("/products?page=abc").await.unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::BAD_REQUEST);
        assert!(err.response.message.starts_with("Invalid query string"));
    }

    #[tokio::test]
    async fn test_search_query_title_alias() {
        let query: SearchQuery = extract("/search?title=desk%20lamp&size=5").await.unwrap();
        assert_eq!(query.keyword(), Some("desk lamp"));
        assert_eq!(query.size, Some(5));
    }

    #[tokio::test]
    async fn test_blank_keyword_is_missing() {
        let query: SearchQuery = extract("/search?keyword=%20%20").await.unwrap();
        assert!(query.keyword().is_none());
    }
}
