//! Unwrapping of the backend's response envelopes.
//!
//! Most endpoints key the payload by resource name (`{"customer": {...}}`,
//! `{"customers": [...], "total": 3}`); a few older ones use
//! `{"success": true, "data": ...}`. Both are accepted.

use helpernote_core::Page;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ClientError, Result};

/// Decode the single resource stored under `key`.
pub(crate) fn item<T: DeserializeOwned>(value: Value, key: &str) -> Result<T> {
    let payload = match value {
        Value::Object(mut object) => match object.remove(key) {
            Some(payload) => payload,
            None => match object.remove("data") {
                Some(Value::Object(mut data)) if data.contains_key(key) => {
                    data.remove(key).unwrap_or(Value::Null)
                }
                Some(data) => data,
                None => {
                    return Err(ClientError::Parse(format!(
                        "Response has no `{}` field",
                        key
                    )))
                }
            },
        },
        other => other,
    };

    serde_json::from_value(payload)
        .map_err(|e| ClientError::Parse(format!("Failed to parse {}: {}", key, e)))
}

/// Decode a list stored under `key`, with its `total`.
pub(crate) fn page<T: DeserializeOwned>(value: Value, key: &str) -> Result<Page<T>> {
    let value = match value {
        Value::Object(mut object) if !object.contains_key(key) && object.contains_key("data") => {
            object.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    };

    if let Value::Array(_) = value {
        let items: Vec<T> = serde_json::from_value(value)
            .map_err(|e| ClientError::Parse(format!("Failed to parse {}: {}", key, e)))?;
        let total = items.len();
        return Ok(Page { items, total });
    }

    Page::from_keyed(value, key)
        .map_err(|e| ClientError::Parse(format!("Failed to parse {}: {}", key, e)))
}
