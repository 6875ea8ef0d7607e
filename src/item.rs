//! Suggestion items returned by a search source
//!
//! An [`Item`] is an opaque record: a mapping from field name to JSON value.
//! The controller only ever looks at one designated field (the configured
//! source field) to extract a display/commit value.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single suggestion record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Item(Map<String, Value>);

impl Item {
    /// Create an empty item
    #[must_use]
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Create an item holding a single text field
    ///
    /// # Examples
    /// ```
    /// use typeahead::Item;
    ///
    /// let item = Item::with_field("name", "Berlin");
    /// assert_eq!(item.text("name").as_deref(), Some("Berlin"));
    /// ```
    #[must_use]
    pub fn with_field(name: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut item = Self::new();
        item.insert(name, value);
        item
    }

    /// Set a field, returning the previous value if any
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(name.into(), value.into())
    }

    /// Raw value of a field
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Text form of a field, used for display and exact matching
    ///
    /// Strings are returned as-is, numbers and booleans as their JSON text.
    /// Null, arrays and objects have no text form.
    #[must_use]
    pub fn text(&self, name: &str) -> Option<String> {
        match self.0.get(name)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Iterate over all fields
    pub fn fields(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Number of fields
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the item has no fields
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume the item into its underlying map
    #[must_use]
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Item {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Item {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
