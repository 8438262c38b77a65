//! Attribute whitelist

use ahash::AHashSet;
use serde::Deserialize;

/// Attribute names accepted when no whitelist is configured
pub const DEFAULT_ATTRIBUTES: [&str; 4] = ["age", "department", "salary", "experience"];

/// Read-only set of attribute names a condition may reference.
///
/// Names are stored lowercased, matching the lowercased field of a parsed
/// condition.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "Vec<String>")]
pub struct AttributeWhitelist {
    names: AHashSet<String>,
}

impl AttributeWhitelist {
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name) || self.names.contains(&name.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for AttributeWhitelist {
    fn default() -> Self {
        DEFAULT_ATTRIBUTES.into_iter().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for AttributeWhitelist {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter
                .into_iter()
                .map(|name| name.into().to_lowercase())
                .collect(),
        }
    }
}

impl From<Vec<String>> for AttributeWhitelist {
    fn from(names: Vec<String>) -> Self {
        names.into_iter().collect()
    }
}
