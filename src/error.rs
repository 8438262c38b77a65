//! Error types for the rule engine

use thiserror::Error;

/// Main error type for the rule engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    #[error("Rule string cannot be empty")]
    EmptyRule,

    #[error("Unbalanced parentheses")]
    UnbalancedParentheses,

    #[error("Misplaced condition: {0}")]
    MisplacedCondition(String),

    #[error("Invalid condition: {0}")]
    InvalidConditionSyntax(String),

    #[error("Invalid attribute: {0}")]
    InvalidAttribute(String),

    #[error("Incomplete tree: '{op}' operator has no {side} operand")]
    IncompleteTree { op: &'static str, side: &'static str },

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Failure class of a [`RuleError`], without the payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    EmptyRule,
    UnbalancedParentheses,
    MisplacedCondition,
    InvalidConditionSyntax,
    InvalidAttribute,
    IncompleteTree,
    Config,
}

impl RuleError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RuleError::EmptyRule => ErrorKind::EmptyRule,
            RuleError::UnbalancedParentheses => ErrorKind::UnbalancedParentheses,
            RuleError::MisplacedCondition(_) => ErrorKind::MisplacedCondition,
            RuleError::InvalidConditionSyntax(_) => ErrorKind::InvalidConditionSyntax,
            RuleError::InvalidAttribute(_) => ErrorKind::InvalidAttribute,
            RuleError::IncompleteTree { .. } => ErrorKind::IncompleteTree,
            RuleError::Config(_) => ErrorKind::Config,
        }
    }
}

impl From<serde_json::Error> for RuleError {
    fn from(err: serde_json::Error) -> Self {
        RuleError::Config(err.to_string())
    }
}

/// Result type alias for the rule engine
pub type Result<T> = std::result::Result<T, RuleError>;
