//! Rule engine: configuration plus the parse / evaluate / combine operations

use crate::config::EngineConfig;
use crate::context::Context;
use crate::error::Result;
use crate::rule::{self, ConditionEvaluator, Node};

/// Parses, combines and evaluates rules under one configuration
#[derive(Debug, Clone, Default)]
pub struct RuleEngine {
    config: EngineConfig,
}

impl RuleEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Build a tree from one rule string
    pub fn parse(&self, rule: &str) -> Result<Node> {
        rule::parser::parse(rule, self.config.case_mode)
    }

    /// Evaluate a tree against a context
    pub fn evaluate(&self, tree: &Node, context: &Context) -> Result<bool> {
        rule::check(tree, &self.condition_evaluator(), context)
    }

    /// Fold several rule strings into one tree with OR.
    /// Returns `Ok(None)` for an empty input.
    pub fn combine<I, S>(&self, rules: I) -> Result<Option<Node>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        rule::combine_with(rules, |r| self.parse(r))
    }

    /// Parse and evaluate in one step
    pub fn check(&self, rule: &str, context: &Context) -> Result<bool> {
        let tree = self.parse(rule)?;
        self.evaluate(&tree, context)
    }

    /// Parse, logging and discarding any failure
    pub fn create_rule(&self, rule: &str) -> Option<Node> {
        match self.parse(rule) {
            Ok(tree) => Some(tree),
            Err(err) => {
                tracing::warn!(rule, error = %err, "error parsing rule");
                None
            }
        }
    }

    fn condition_evaluator(&self) -> ConditionEvaluator<'_> {
        ConditionEvaluator::new(&self.config.attributes, self.config.case_mode)
    }
}
