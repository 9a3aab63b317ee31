//! OTAPI catalog provider client

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use super::envelope;
use super::http_client::{HttpClientTrait, TransportError};
use crate::config::UpstreamConfig;
use crate::domain::{
    CatalogProvider, Category, ItemFrame, ItemQuery, Product, UpstreamError, UpstreamOperation,
    Vendor,
};

const POPULAR_RATING_PARAMETERS: &str = "<RatingListItemSearchParameters><ItemRatingType>Popular</ItemRatingType></RatingListItemSearchParameters>";

/// Client for the upstream catalog provider.
///
/// Every call is a GET on `{base_url}/{Operation}` carrying the instance
/// key and language; the JSON envelope is checked before the payload is
/// extracted.
#[derive(Debug)]
pub struct OtapiClient<C: HttpClientTrait> {
    client: C,
    base_url: String,
    instance_key: String,
    language: String,
}

impl<C: HttpClientTrait> OtapiClient<C> {
    pub fn new(client: C, config: &UpstreamConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            instance_key: config.instance_key.clone(),
            language: config.language.clone(),
        }
    }

    fn operation_url(&self, operation: UpstreamOperation) -> String {
        format!("{}/{}", self.base_url, operation.as_str())
    }

    async fn call(
        &self,
        operation: UpstreamOperation,
        params: Vec<(&str, String)>,
    ) -> Result<Value, UpstreamError> {
        let url = self.operation_url(operation);

        let mut query = vec![
            ("instanceKey", self.instance_key.clone()),
            ("language", self.language.clone()),
        ];
        query.extend(params);

        debug!(operation = %operation, "Calling catalog provider");

        let body = self
            .client
            .get_json(&url, &query)
            .await
            .map_err(|e| transport_failure(operation, e))?;

        if let Err(e) = envelope::check(operation, &body) {
            warn!(operation = %operation, message = %e.message, "Catalog provider rejected request");
            return Err(e);
        }

        Ok(body)
    }

    async fn categories(
        &self,
        operation: UpstreamOperation,
        params: Vec<(&str, String)>,
    ) -> Result<Vec<Category>, UpstreamError> {
        let body = self.call(operation, params).await?;
        envelope::list(operation, body.pointer(envelope::CATEGORY_CONTENT))
    }
}

fn transport_failure(operation: UpstreamOperation, error: TransportError) -> UpstreamError {
    warn!(operation = %operation, error = %error, "Catalog provider unreachable");

    match error {
        TransportError::Decode(_) => UpstreamError::malformed(operation),
        TransportError::Request(_) | TransportError::Status { .. } => {
            UpstreamError::transport(operation)
        }
    }
}

/// Search parameters document; the term is embedded as given
fn search_parameters(query: &ItemQuery) -> String {
    match query {
        ItemQuery::Category(id) => format!(
            "<SearchItemsParameters><CategoryId>{}</CategoryId></SearchItemsParameters>",
            id
        ),
        ItemQuery::Title(keyword) => format!(
            "<SearchItemsParameters><ItemTitle>{}</ItemTitle></SearchItemsParameters>",
            keyword
        ),
    }
}

#[async_trait]
impl<C: HttpClientTrait> CatalogProvider for OtapiClient<C> {
    async fn root_categories(&self) -> Result<Vec<Category>, UpstreamError> {
        self.categories(UpstreamOperation::GetRootCategoryInfoList, Vec::new())
            .await
    }

    async fn subcategories(&self, parent_id: &str) -> Result<Vec<Category>, UpstreamError> {
        self.categories(
            UpstreamOperation::GetCategorySubcategoryInfoList,
            vec![("parentCategoryId", parent_id.to_string())],
        )
        .await
    }

    async fn search_items(
        &self,
        query: &ItemQuery,
        position: i64,
        size: i64,
    ) -> Result<ItemFrame, UpstreamError> {
        let operation = UpstreamOperation::BatchSearchItemsFrame;
        let body = self
            .call(
                operation,
                vec![
                    ("xmlParameters", search_parameters(query)),
                    ("framePosition", position.to_string()),
                    ("frameSize", size.to_string()),
                    ("blockList", "AvailableSearchMethods".to_string()),
                ],
            )
            .await?;

        Ok(ItemFrame {
            items: envelope::list(operation, body.pointer(envelope::SEARCH_ITEMS))?,
            total_count: envelope::count(operation, body.pointer(envelope::SEARCH_TOTAL))?,
            maximum_page_count: envelope::count(
                operation,
                body.pointer(envelope::SEARCH_MAX_PAGES),
            )?,
            available_search_methods: envelope::list(
                operation,
                body.pointer(envelope::SEARCH_METHODS),
            )?,
        })
    }

    async fn popular_items(&self, offset: i64, size: i64) -> Result<ItemFrame, UpstreamError> {
        let operation = UpstreamOperation::SearchRatingListItems;
        let body = self
            .call(
                operation,
                vec![
                    ("xmlSearchParameters", POPULAR_RATING_PARAMETERS.to_string()),
                    ("framePosition", offset.to_string()),
                    ("frameSize", size.to_string()),
                ],
            )
            .await?;

        Ok(ItemFrame {
            items: envelope::list(
                operation,
                envelope::first_present(&body, envelope::POPULAR_ITEMS),
            )?,
            total_count: envelope::count(
                operation,
                envelope::first_present(&body, envelope::POPULAR_TOTAL),
            )?,
            maximum_page_count: envelope::count(
                operation,
                envelope::first_present(&body, envelope::POPULAR_MAX_PAGES),
            )?,
            available_search_methods: Vec::new(),
        })
    }

    async fn item(&self, item_id: &str) -> Result<Option<Product>, UpstreamError> {
        let operation = UpstreamOperation::BatchGetItemFullInfo;
        let body = self
            .call(
                operation,
                vec![("blockList", String::new()), ("itemId", item_id.to_string())],
            )
            .await?;

        envelope::optional(operation, body.pointer(envelope::ITEM))
    }

    async fn vendor(&self, vendor_id: &str) -> Result<Option<Vendor>, UpstreamError> {
        let operation = UpstreamOperation::GetVendorInfo;
        let body = self
            .call(operation, vec![("vendorId", vendor_id.to_string())])
            .await?;

        envelope::optional(operation, body.pointer(envelope::VENDOR))
    }
}
