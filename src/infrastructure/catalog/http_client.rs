use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::domain::DomainError;

/// Failure below the provider envelope
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse response: {0}")]
    Decode(String),
}

/// Trait for HTTP client operations (for mocking)
#[async_trait]
pub trait HttpClientTrait: Send + Sync + std::fmt::Debug {
    /// Issues a GET with the given query pairs and decodes the JSON body
    async fn get_json(&self, url: &str, query: &[(&str, String)])
        -> Result<Value, TransportError>;
}

/// Real HTTP client using reqwest
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClientTrait for HttpClient {
    async fn get_json(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<Value, TransportError> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status { status, body });
        }

        response
            .json()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Mutex, RwLock};

    /// A request seen by [`MockHttpClient`]
    #[derive(Debug, Clone)]
    pub struct RecordedRequest {
        pub url: String,
        pub query: Vec<(String, String)>,
    }

    impl RecordedRequest {
        pub fn param(&self, name: &str) -> Option<&str> {
            self.query
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str())
        }
    }

    /// Canned responses keyed by URL
    #[derive(Debug, Default)]
    pub struct MockHttpClient {
        responses: RwLock<HashMap<String, Value>>,
        errors: RwLock<HashMap<String, TransportError>>,
        requests: Mutex<Vec<RecordedRequest>>,
    }

    impl MockHttpClient {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_response(self, url: impl Into<String>, response: Value) -> Self {
            self.responses.write().unwrap().insert(url.into(), response);
            self
        }

        pub fn with_error(self, url: impl Into<String>, error: TransportError) -> Self {
            self.errors.write().unwrap().insert(url.into(), error);
            self
        }

        pub fn requests(&self) -> Vec<RecordedRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl HttpClientTrait for MockHttpClient {
        async fn get_json(
            &self,
            url: &str,
            query: &[(&str, String)],
        ) -> Result<Value, TransportError> {
            self.requests.lock().unwrap().push(RecordedRequest {
                url: url.to_string(),
                query: query
                    .iter()
                    .map(|(key, value)| (key.to_string(), value.clone()))
                    .collect(),
            });

            if let Some(error) = self.errors.read().unwrap().get(url) {
                return Err(error.clone());
            }

            self.responses
                .read()
                .unwrap()
                .get(url)
                .cloned()
                .ok_or_else(|| TransportError::Request(format!("No mock response for {}", url)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_get_json_sends_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/GetVendorInfo"))
            .and(query_param("instanceKey", "test-instance"))
            .and(query_param("vendorId", "v 1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ErrorCode": "Ok"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::new();
        let body = client
            .get_json(
                &format!("{}/GetVendorInfo", server.uri()),
                &[
                    ("instanceKey", "test-instance".to_string()),
                    ("vendorId", "v 1".to_string()),
                ],
            )
            .await
            .unwrap();

        assert_eq!(body["ErrorCode"], "Ok");
    }

    #[tokio::test]
    async fn test_get_json_xml_parameters_are_encoded() {
        let xml = "<SearchItemsParameters><ItemTitle>red & blue</ItemTitle></SearchItemsParameters>";

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/BatchSearchItemsFrame"))
            .and(query_param("xmlParameters", xml))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ErrorCode": "Ok"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::new();
        let result = client
            .get_json(
                &format!("{}/BatchSearchItemsFrame", server.uri()),
                &[("xmlParameters", xml.to_string())],
            )
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_get_json_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let err = HttpClient::new()
            .get_json(&format!("{}/GetRootCategoryInfoList", server.uri()), &[])
            .await
            .unwrap_err();

        assert_eq!(
            err,
            TransportError::Status {
                status: 503,
                body: "maintenance".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_get_json_invalid_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = HttpClient::new()
            .get_json(&format!("{}/GetVendorInfo", server.uri()), &[])
            .await
            .unwrap_err();

        assert!(matches!(err, TransportError::Decode(_)));
    }

    #[tokio::test]
    async fn test_with_timeout_gives_up() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"ErrorCode": "Ok"}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let client = HttpClient::with_timeout(Duration::from_millis(50)).unwrap();
        let err = client
            .get_json(&format!("{}/GetVendorInfo", server.uri()), &[])
            .await
            .unwrap_err();

        assert!(matches!(err, TransportError::Request(_)));
    }
}
