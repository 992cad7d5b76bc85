use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A Firestore field value. Only the variants this client needs:
/// strings, booleans, and explicit nulls.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Value {
    #[serde(rename = "stringValue", skip_serializing_if = "Option::is_none")]
    pub string_value: Option<String>,
    #[serde(rename = "booleanValue", skip_serializing_if = "Option::is_none")]
    pub boolean_value: Option<bool>,
    #[serde(rename = "nullValue", skip_serializing_if = "Option::is_none")]
    pub null_value: Option<String>,
}

impl Value {
    pub fn string(s: impl Into<String>) -> Self {
        Self {
            string_value: Some(s.into()),
            ..Default::default()
        }
    }

    pub fn boolean(b: bool) -> Self {
        Self {
            boolean_value: Some(b),
            ..Default::default()
        }
    }

    pub fn null() -> Self {
        Self {
            null_value: Some("NULL_VALUE".to_string()),
            ..Default::default()
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.string_value.as_deref()
    }

    pub fn as_bool(&self) -> Option<bool> {
        self.boolean_value
    }
}

/// A Firestore document: resource name plus a flat field map.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    /// Full resource name, e.g.
    /// `projects/{p}/databases/(default)/documents/events/{id}`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub fields: HashMap<String, Value>,
}

impl Document {
    /// The document id (last path segment of the resource name).
    pub fn doc_id(&self) -> Option<&str> {
        self.name.as_deref()?.rsplit('/').next()
    }

    pub fn field_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key)?.as_str()
    }

    pub fn field_bool(&self, key: &str) -> Option<bool> {
        self.fields.get(key)?.as_bool()
    }
}

/// One element of a `runQuery` response stream.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryResult {
    pub document: Option<Document>,
    #[serde(rename = "readTime")]
    pub read_time: Option<String>,
}
