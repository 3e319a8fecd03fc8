use std::collections::BTreeMap;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Attribute state of one resource instance as the host stores it.
///
/// An empty id marks a resource that no longer exists remotely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceData {
    #[serde(default)]
    id: String,

    #[serde(default)]
    attributes: BTreeMap<String, Value>,
}

impl ResourceData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(id: &str) -> Self {
        Self {
            id: id.to_string(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_id<S: Into<String>>(&mut self, id: S) {
        self.id = id.into();
    }

    pub fn is_gone(&self) -> bool {
        self.id.is_empty()
    }

    pub fn attributes(&self) -> &BTreeMap<String, Value> {
        &self.attributes
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key).filter(|v| !v.is_null())
    }

    /// A string attribute, `None` when unset or empty.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// A scalar attribute as text, numbers and booleans formatted.
    pub fn get_string(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// A string set attribute, sorted and without duplicates.
    pub fn get_set(&self, key: &str) -> Vec<String> {
        let set: BTreeSet<String> = self
            .get(key)
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        set.into_iter().collect()
    }

    pub fn set<V: Into<Value>>(&mut self, key: &str, value: V) {
        self.attributes.insert(key.to_string(), value.into());
    }

    pub fn set_set<I>(&mut self, key: &str, values: I)
    where
        I: IntoIterator<Item = String>,
    {
        let set: BTreeSet<String> = values.into_iter().collect();
        let items: Vec<Value> = set.into_iter().map(Value::String).collect();
        self.set(key, Value::Array(items));
    }

    pub fn is_set(&self, key: &str) -> bool {
        match self.get(key) {
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Array(items)) => !items.is_empty(),
            Some(_) => true,
            None => false,
        }
    }
}
