//! Rule Engine Core - boolean rule parsing and evaluation
//!
//! Rules are attribute comparisons joined by AND/OR and grouped with
//! parentheses:
//!
//! ```
//! use rule_engine_core::{combine, evaluate, parse, Context};
//!
//! let tree = parse("(age > 30 AND department == 'Sales')").unwrap();
//! let user = Context::new().with("age", 32).with("department", "sales");
//! assert!(evaluate(&tree, &user).unwrap());
//!
//! let any = combine(["age > 60", "(age > 30 AND salary > 40000)"]).unwrap().unwrap();
//! assert!(!evaluate(&any, &user.with("salary", 35000)).unwrap());
//! ```
//!
//! The free functions use the default configuration (whitelist `age`,
//! `department`, `salary`, `experience`; leaf text lowercased). Build a
//! [`RuleEngine`] for anything else.

pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod rule;

pub use crate::config::{AttributeWhitelist, CaseMode, EngineConfig};
pub use crate::context::{Context, Value};
pub use crate::engine::RuleEngine;
pub use crate::error::{ErrorKind, Result, RuleError};
pub use crate::rule::{LogicalOp, Node};

use once_cell::sync::Lazy;

/// Engine with the default configuration, shared by the free functions
static DEFAULT_ENGINE: Lazy<RuleEngine> = Lazy::new(RuleEngine::default);

/// Build a tree from one rule string
pub fn parse(rule: &str) -> Result<Node> {
    DEFAULT_ENGINE.parse(rule)
}

/// Evaluate a tree against a context
pub fn evaluate(tree: &Node, context: &Context) -> Result<bool> {
    DEFAULT_ENGINE.evaluate(tree, context)
}

/// Fold rule strings into a left-associated OR chain; `Ok(None)` when empty
pub fn combine<I, S>(rules: I) -> Result<Option<Node>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    DEFAULT_ENGINE.combine(rules)
}

/// Parse with the default configuration, logging a failure and returning
/// `None` instead of an error
pub fn create_rule(rule: &str) -> Option<Node> {
    DEFAULT_ENGINE.create_rule(rule)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RULE1: &str = "(age > 30 AND department == 'Sales')";
    const RULE2: &str = "(experience > 5 AND salary > 40000)";
    const RULE3: &str = "(age < 25 AND department == 'Marketing')";

    #[test]
    fn test_parse_shape() {
        let tree = parse("(age > 30 and department == 'sales')").unwrap();
        assert_eq!(tree.op(), Some(LogicalOp::And));
        assert_eq!(tree.left(), Some(&Node::operand("age > 30")));
        assert_eq!(tree.right(), Some(&Node::operand("department == 'sales'")));
    }

    #[test]
    fn test_evaluate_rule() {
        let tree = parse(RULE1).unwrap();
        let ctx = Context::new().with("age", 32).with("department", "sales");
        assert!(evaluate(&tree, &ctx).unwrap());

        let ctx = Context::new().with("age", 20).with("department", "sales");
        assert!(!evaluate(&tree, &ctx).unwrap());
    }

    #[test]
    fn test_combine_empty() {
        let rules: [&str; 0] = [];
        assert_eq!(combine(rules), Ok(None));
    }

    #[test]
    fn test_combine_single_matches_parse() {
        assert_eq!(combine([RULE1]).unwrap(), Some(parse(RULE1).unwrap()));
    }

    #[test]
    fn test_combine_three_rules() {
        let tree = combine([RULE1, RULE2, RULE3]).unwrap().unwrap();
        let expected = Node::operator(
            LogicalOp::Or,
            Node::operator(LogicalOp::Or, parse(RULE1).unwrap(), parse(RULE2).unwrap()),
            parse(RULE3).unwrap(),
        );
        assert_eq!(tree, expected);

        let ctx = Context::new()
            .with("age", 32)
            .with("department", "sales")
            .with("salary", 45000)
            .with("experience", 3);
        assert!(evaluate(&tree, &ctx).unwrap());

        let ctx = Context::new()
            .with("age", 28)
            .with("department", "hr")
            .with("salary", 45000)
            .with("experience", 3);
        assert!(!evaluate(&tree, &ctx).unwrap());
    }

    #[test]
    fn test_combine_propagates_parse_failure() {
        assert_eq!(
            combine([RULE1, "(age > 3", RULE2]),
            Err(RuleError::UnbalancedParentheses)
        );
    }

    #[test]
    fn test_unbalanced_parentheses() {
        assert_eq!(parse("age > 30)"), Err(RuleError::UnbalancedParentheses));
        assert_eq!(parse("age > 30 AND ("), Err(RuleError::UnbalancedParentheses));
    }

    #[test]
    fn test_invalid_attribute_on_evaluation() {
        let tree = parse("title == 'vp'").unwrap();
        let err = evaluate(&tree, &Context::new().with("title", "vp")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidAttribute);
    }

    #[test]
    fn test_and_surfaces_right_error() {
        let tree = parse("age > 99 AND title == 'vp'").unwrap();
        let err = evaluate(&tree, &Context::new().with("age", 20)).unwrap_err();
        assert_eq!(err, RuleError::InvalidAttribute("title".to_string()));
    }

    #[test]
    fn test_or_short_circuits() {
        let tree = parse("age > 10 OR title == 'vp'").unwrap();
        assert_eq!(evaluate(&tree, &Context::new().with("age", 20)), Ok(true));
    }

    #[test]
    fn test_in_lowercased_list() {
        let tree = parse("department in 'Sales,Marketing'").unwrap();
        assert!(evaluate(&tree, &Context::new().with("department", "sales")).unwrap());
        assert!(evaluate(&tree, &Context::new().with("department", "marketing")).unwrap());
        assert!(!evaluate(&tree, &Context::new().with("department", "Sales")).unwrap());
    }

    #[test]
    fn test_create_rule_adapter() {
        assert!(create_rule("((age > 30)").is_none());
        assert_eq!(create_rule(RULE1), parse(RULE1).ok());
    }
}
