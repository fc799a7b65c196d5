//! List envelopes.
//!
//! The backend wraps every list under the resource name:
//! `{"customers": [...], "total": 12}`. [`Page`] strips the key.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
}

impl<T: DeserializeOwned> Page<T> {
    /// Decode `{"<key>": [...], "total": n}`.
    ///
    /// A missing `total` falls back to the number of items.
    pub fn from_keyed(value: serde_json::Value, key: &str) -> serde_json::Result<Self> {
        let mut object = match value {
            serde_json::Value::Object(object) => object,
            other => {
                return Err(serde::de::Error::custom(format!(
                    "expected object with `{key}`, got {other}"
                )))
            }
        };

        let items = object
            .remove(key)
            .ok_or_else(|| <serde_json::Error as serde::de::Error>::missing_field("items"))
            .and_then(serde_json::from_value::<Vec<T>>)?;
        let total = match object.remove("total") {
            Some(total) => serde_json::from_value(total)?,
            None => items.len(),
        };

        Ok(Self { items, total })
    }
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
