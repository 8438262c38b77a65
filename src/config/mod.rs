//! Engine configuration
//!
//! This module holds the attribute whitelist and the case handling mode,
//! and loads both from JSON documents.

mod whitelist;

pub use whitelist::*;

use crate::error::{Result, RuleError};
use serde::Deserialize;

/// How letter case in leaf conditions and context values is treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseMode {
    /// Leaf text is lowercased with the keywords; context values are left alone
    #[default]
    Verbatim,
    /// Leaf text keeps its case; only field names and operators are case-insensitive
    PreserveLiterals,
    /// Leaf text is lowercased and string context values are lowercased to match
    FoldContext,
}

impl CaseMode {
    /// Whether the tokenizer lowercases leaf condition text
    #[inline]
    pub fn lowercases_conditions(self) -> bool {
        !matches!(self, CaseMode::PreserveLiterals)
    }

    /// Whether string context values are lowercased before comparison
    #[inline]
    pub fn folds_context(self) -> bool {
        matches!(self, CaseMode::FoldContext)
    }
}

/// Configuration for a [`RuleEngine`](crate::RuleEngine)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub attributes: AttributeWhitelist,
    pub case_mode: CaseMode,
}

impl EngineConfig {
    pub fn new(attributes: AttributeWhitelist, case_mode: CaseMode) -> Self {
        Self {
            attributes,
            case_mode,
        }
    }

    /// Load configuration from a JSON document
    ///
    /// Expected format: `{"attributes": ["age", ...], "case_mode": "verbatim"}`.
    /// Missing keys fall back to the defaults; an empty attribute list is rejected.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        if config.attributes.is_empty() {
            return Err(RuleError::Config("attribute whitelist is empty".to_string()));
        }
        Ok(config)
    }

    pub fn with_case_mode(mut self, case_mode: CaseMode) -> Self {
        self.case_mode = case_mode;
        self
    }
}
