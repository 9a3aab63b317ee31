//! Catalog entities
//!
//! These are transient views over provider payloads. Each entity keeps the
//! provider object exactly as received, so clients see the provider's shape.
//! The few fields the gateway reasons about are read through lenient
//! accessors that accept either spelling the provider uses.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{json, Value};

/// First non-null value under any of `names`
fn field<'a>(raw: &'a Value, names: &[&str]) -> Option<&'a Value> {
    names
        .iter()
        .find_map(|name| raw.get(*name).filter(|value| !value.is_null()))
}

/// Ids come back as strings or numbers; numbers are kept as decimal text
fn text(raw: &Value, names: &[&str]) -> Option<String> {
    match field(raw, names)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn insert(raw: &mut Value, name: &str, value: Value) {
    if let Value::Object(map) = raw {
        map.insert(name.to_string(), value);
    }
}

/// Catalog category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(Value);

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self(json!({"Id": id.into(), "Name": name.into()}))
    }

    pub fn hidden(mut self) -> Self {
        insert(&mut self.0, "IsHidden", Value::Bool(true));
        self
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        insert(&mut self.0, "ParentId", Value::String(parent_id.into()));
        self
    }

    pub fn id(&self) -> Option<String> {
        text(&self.0, &["Id", "id"])
    }

    pub fn name(&self) -> Option<&str> {
        field(&self.0, &["Name", "name"]).and_then(Value::as_str)
    }

    pub fn parent_id(&self) -> Option<String> {
        text(&self.0, &["ParentId", "parentId"])
    }

    /// Only an explicit `true` hides a category
    pub fn is_hidden(&self) -> bool {
        matches!(field(&self.0, &["IsHidden", "isHidden"]), Some(Value::Bool(true)))
    }

    pub fn is_visible(&self) -> bool {
        !self.is_hidden()
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

/// Catalog item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Product(Value);

impl Product {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self(json!({"Id": id.into(), "Title": title.into()}))
    }

    pub fn id(&self) -> Option<String> {
        text(&self.0, &["Id", "id"])
    }

    pub fn title(&self) -> Option<&str> {
        field(&self.0, &["Title", "title"]).and_then(Value::as_str)
    }

    pub fn vendor_id(&self) -> Option<String> {
        text(&self.0, &["VendorId", "vendorId"])
    }
}

/// Seller of catalog items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vendor(Value);

impl Vendor {
    pub fn name(&self) -> Option<&str> {
        field(&self.0, &["Name", "name"]).and_then(Value::as_str)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

/// Root category with its subcategories inlined
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryWithSubcategories {
    pub category: Category,
    pub subcategories: Vec<Category>,
}

impl Serialize for CategoryWithSubcategories {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let fields = match self.category.as_value() {
            Value::Object(map) => Some(map),
            _ => None,
        };

        let mut map = serializer.serialize_map(None)?;
        for (name, value) in fields.into_iter().flatten() {
            if name != "subcategories" {
                map.serialize_entry(name, value)?;
            }
        }
        map.serialize_entry("subcategories", &self.subcategories)?;
        map.end()
    }
}
