//! Evaluation context: the attribute record a rule is checked against

mod value;

pub use value::*;

use crate::error::Result;
use ahash::AHashMap;
use serde::Deserialize;

/// Mapping from attribute name to value, supplied per evaluation
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Context {
    values: AHashMap<String, Value>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(name.into(), value.into())
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Look up a lowercased field name. An exact key wins; otherwise the
    /// first key that lowercases to `field` is used.
    pub fn lookup(&self, field: &str) -> Option<&Value> {
        self.values.get(field).or_else(|| {
            self.values
                .iter()
                .find(|(key, _)| key.to_lowercase() == field)
                .map(|(_, value)| value)
        })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Load a context from a JSON object of numbers and strings
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl<K, V> FromIterator<(K, V)> for Context
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
