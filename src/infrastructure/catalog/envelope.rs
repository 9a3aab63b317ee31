//! Provider envelope checks and payload extraction
//!
//! The provider wraps every payload in an object carrying `ErrorCode` and
//! `ErrorDescription`. Payload locations are addressed with JSON pointers.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::{UpstreamError, UpstreamOperation};

pub(crate) const CATEGORY_CONTENT: &str = "/CategoryInfoList/Content";

pub(crate) const SEARCH_ITEMS: &str = "/Result/Items/Items/Content";
pub(crate) const SEARCH_TOTAL: &str = "/Result/Items/Items/TotalCount";
pub(crate) const SEARCH_MAX_PAGES: &str = "/Result/Items/MaximumPageCount";
pub(crate) const SEARCH_METHODS: &str = "/Result/AvailableSearchMethods/Content";

pub(crate) const ITEM: &str = "/Result/Item";
pub(crate) const VENDOR: &str = "/VendorInfo";

/// Where the rating list may keep its items, in lookup order
pub(crate) const POPULAR_ITEMS: &[&str] = &[
    "/Result/Items/Items/Content",
    "/Result/Items/Content",
    "/Result/Content",
    "/OtapiItemInfoSubList/Content",
];

/// Where the rating list may keep its total count, in lookup order
pub(crate) const POPULAR_TOTAL: &[&str] = &[
    "/Result/Items/Items/TotalCount",
    "/Result/Items/TotalCount",
    "/Result/TotalCount",
    "/OtapiItemInfoSubList/TotalCount",
];

/// Where the rating list may keep its page limit, in lookup order
pub(crate) const POPULAR_MAX_PAGES: &[&str] = &[
    "/Result/Items/MaximumPageCount",
    "/Result/MaximumPageCount",
    "/Result/Items/Items/MaximumPageCount",
    "/OtapiItemInfoSubList/MaximumPageCount",
];

/// Fails unless the envelope reports success for this operation
pub(crate) fn check(operation: UpstreamOperation, body: &Value) -> Result<(), UpstreamError> {
    let code = body.get("ErrorCode");

    let failed = if operation.requires_ok_code() {
        code.and_then(Value::as_str) != Some("Ok")
    } else {
        code.is_some_and(|c| is_truthy(c) && c.as_str() != Some("Ok"))
    };

    if failed {
        let description = body.get("ErrorDescription").and_then(Value::as_str);
        return Err(UpstreamError::rejected(operation, description));
    }

    Ok(())
}

/// Returns the first location that holds a non-null value
pub(crate) fn first_present<'a>(body: &'a Value, paths: &[&str]) -> Option<&'a Value> {
    paths
        .iter()
        .find_map(|path| body.pointer(path).filter(|value| !value.is_null()))
}

/// Reads a list; a missing list is empty
pub(crate) fn list<T: DeserializeOwned>(
    operation: UpstreamOperation,
    value: Option<&Value>,
) -> Result<Vec<T>, UpstreamError> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(value) => decode(operation, value),
    }
}

/// Reads an optional object; a missing object is `None`
pub(crate) fn optional<T: DeserializeOwned>(
    operation: UpstreamOperation,
    value: Option<&Value>,
) -> Result<Option<T>, UpstreamError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(value) => decode(operation, value).map(Some),
    }
}

/// Reads a count; missing counts are zero. Numeric strings are accepted.
pub(crate) fn count(operation: UpstreamOperation, value: Option<&Value>) -> Result<u64, UpstreamError> {
    match value {
        None | Some(Value::Null) => Ok(0),
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .ok_or_else(|| UpstreamError::malformed(operation)),
        Some(Value::String(s)) => s
            .trim()
            .parse()
            .map_err(|_| UpstreamError::malformed(operation)),
        Some(_) => Err(UpstreamError::malformed(operation)),
    }
}

fn decode<T: DeserializeOwned>(
    operation: UpstreamOperation,
    value: &Value,
) -> Result<T, UpstreamError> {
    serde_json::from_value(value.clone()).map_err(|e| {
        tracing::warn!(operation = %operation, error = %e, "Unexpected provider payload shape");
        UpstreamError::malformed(operation)
    })
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
