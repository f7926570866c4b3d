use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub type ItemId = u64;

/// A recommendable item with its display metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Item {
    #[serde(alias = "movie_id")]
    pub id: ItemId,
    pub title: String,
    /// Any other fields carried by the catalog record, kept verbatim
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

impl Item {
    #[inline]
    #[must_use]
    pub fn new(id: ItemId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            metadata: Map::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    #[inline]
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.metadata.get(key)
    }
}
