use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One row of uploaded tabular data, keyed by column name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Record {
    pub data: HashMap<String, serde_json::Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data
            .insert(key.into(), serde_json::Value::String(value.into()));
        self
    }

    /// String value of `field`, if present and a JSON string.
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.data.get(field).and_then(|v| v.as_str())
    }
}

impl From<HashMap<String, String>> for Record {
    fn from(row: HashMap<String, String>) -> Self {
        let data = row
            .into_iter()
            .map(|(k, v)| (k, serde_json::Value::String(v)))
            .collect();
        Self { data }
    }
}

/// Where a source column lands in the output document, and how it is converted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mapping {
    pub from: String,
    pub to: String,
    pub r#type: String,
}

impl Mapping {
    pub fn new(from: impl Into<String>, to: impl Into<String>, r#type: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            r#type: r#type.into(),
        }
    }
}

/// JSON object accumulated field by field during conversion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutputDocument {
    fields: serde_json::Map<String, serde_json::Value>,
}

impl OutputDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> &mut Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.fields.get(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn build(self) -> serde_json::Value {
        serde_json::Value::Object(self.fields)
    }
}
