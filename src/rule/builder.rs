//! Stack-based tree builder
//!
//! Consumes the token sequence produced by the tokenizer. Parentheses suspend
//! the node under construction on an explicit stack; keywords wrap the current
//! node as the left child of a new operator; conditions fill the right slot.
//! Keyword sequences are not validated here: a dangling operator leaves a
//! missing child that the evaluator reports.

use crate::rule::ast::{LogicalOp, Node};
use crate::rule::tokenizer::Token;
use crate::error::{Result, RuleError};

/// Build a tree from a token sequence
pub fn build(tokens: Vec<Token>) -> Result<Node> {
    let mut builder = TreeBuilder::default();
    for token in tokens {
        builder.push(token)?;
    }
    builder.finish()
}

/// Mutable construction state, discarded once the tree is returned
#[derive(Debug, Default)]
struct TreeBuilder {
    current: Option<Node>,
    stack: Vec<Option<Node>>,
}

impl TreeBuilder {
    fn push(&mut self, token: Token) -> Result<()> {
        match token {
            Token::OpenParen => {
                self.stack.push(self.current.take());
            }
            Token::CloseParen => {
                let parent = self.stack.pop().ok_or(RuleError::UnbalancedParentheses)?;
                if let Some(mut parent) = parent {
                    attach_group(&mut parent, self.current.take())?;
                    self.current = Some(parent);
                }
            }
            Token::And => self.wrap(LogicalOp::And),
            Token::Or => self.wrap(LogicalOp::Or),
            Token::Condition(condition) => {
                let operand = Node::Operand { condition };
                match self.current.as_mut() {
                    None => self.current = Some(operand),
                    Some(current) => attach_right(current, operand)?,
                }
            }
        }
        Ok(())
    }

    fn wrap(&mut self, op: LogicalOp) {
        let left = self.current.take().map(Box::new);
        self.current = Some(Node::Operator {
            op,
            left,
            right: None,
        });
    }

    fn finish(self) -> Result<Node> {
        if !self.stack.is_empty() {
            return Err(RuleError::UnbalancedParentheses);
        }
        self.current.ok_or(RuleError::EmptyRule)
    }
}

/// Attach a closed group to its suspended parent: left slot first, then right.
/// An empty group still takes the slot, leaving it empty.
fn attach_group(parent: &mut Node, child: Option<Node>) -> Result<()> {
    match (parent, child) {
        (Node::Operator { left, right, .. }, child) => {
            let child = child.map(Box::new);
            if left.is_none() {
                *left = child;
            } else {
                *right = child;
            }
            Ok(())
        }
        (Node::Operand { .. }, None) => Ok(()),
        (Node::Operand { condition }, Some(child)) => Err(RuleError::MisplacedCondition(format!(
            "group {} follows condition '{}' without an operator",
            child, condition
        ))),
    }
}

fn attach_right(current: &mut Node, operand: Node) -> Result<()> {
    match current {
        Node::Operator { right, .. } => {
            *right = Some(Box::new(operand));
            Ok(())
        }
        Node::Operand { condition } => Err(RuleError::MisplacedCondition(format!(
            "'{}' follows '{}' without an operator",
            operand, condition
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CaseMode;
    use crate::rule::tokenizer::tokenize;

    fn build_str(rule: &str) -> Result<Node> {
        build(tokenize(rule, CaseMode::Verbatim)?)
    }

    #[test]
    fn test_build_grouped_and() {
        let node = build_str("(age > 30 AND department == 'Sales')").unwrap();
        assert_eq!(
            node,
            Node::operator(
                LogicalOp::And,
                Node::operand("age > 30"),
                Node::operand("department == 'sales'"),
            )
        );
    }

    #[test]
    fn test_build_single_condition() {
        assert_eq!(build_str("salary >= 40000").unwrap(), Node::operand("salary >= 40000"));
    }

    #[test]
    fn test_chain_is_left_grouped() {
        // No precedence: a OR b AND c groups as (a OR b) AND c
        let node = build_str("age > 1 OR salary > 2 AND experience > 3").unwrap();
        assert_eq!(
            node,
            Node::operator(
                LogicalOp::And,
                Node::operator(LogicalOp::Or, Node::operand("age > 1"), Node::operand("salary > 2")),
                Node::operand("experience > 3"),
            )
        );
    }

    #[test]
    fn test_group_on_the_right() {
        let node = build_str("age > 1 AND (salary > 2 OR experience > 3)").unwrap();
        assert_eq!(
            node,
            Node::operator(
                LogicalOp::And,
                Node::operand("age > 1"),
                Node::operator(
                    LogicalOp::Or,
                    Node::operand("salary > 2"),
                    Node::operand("experience > 3"),
                ),
            )
        );
    }

    #[test]
    fn test_two_groups() {
        let node = build_str("(age > 1 AND salary > 2) OR (experience > 3 AND age < 9)").unwrap();
        assert_eq!(node.op(), Some(LogicalOp::Or));
        assert_eq!(node.left().and_then(Node::op), Some(LogicalOp::And));
        assert_eq!(node.right().and_then(Node::op), Some(LogicalOp::And));
        assert!(node.is_complete());
    }

    #[test]
    fn test_unbalanced_close() {
        assert_eq!(
            build_str("(age > 30))"),
            Err(RuleError::UnbalancedParentheses)
        );
        assert_eq!(build_str(")age > 30"), Err(RuleError::UnbalancedParentheses));
    }

    #[test]
    fn test_unbalanced_open() {
        assert_eq!(
            build_str("(age > 30 AND salary > 5"),
            Err(RuleError::UnbalancedParentheses)
        );
        assert_eq!(build_str("age > 30 ("), Err(RuleError::UnbalancedParentheses));
    }

    #[test]
    fn test_dangling_operator_builds_incomplete_tree() {
        let node = build_str("age > 30 AND").unwrap();
        assert_eq!(node.op(), Some(LogicalOp::And));
        assert!(node.right().is_none());
        assert!(!node.is_complete());

        let node = build_str("AND age > 30").unwrap();
        assert!(node.left().is_none());
        assert!(!node.is_complete());
    }

    #[test]
    fn test_doubled_operator_builds_incomplete_tree() {
        let node = build_str("age > 30 AND OR salary > 5").unwrap();
        assert_eq!(node.op(), Some(LogicalOp::Or));
        let inner = node.left().unwrap();
        assert_eq!(inner.op(), Some(LogicalOp::And));
        assert!(inner.right().is_none());
    }

    #[test]
    fn test_empty_group_has_no_tree() {
        assert_eq!(build_str("()"), Err(RuleError::EmptyRule));
    }

    #[test]
    fn test_condition_after_group_without_operator() {
        let err = build_str("(age > 1) salary > 2").unwrap_err();
        assert!(matches!(err, RuleError::MisplacedCondition(_)));

        let err = build_str("age > 1 (salary > 2)").unwrap_err();
        assert!(matches!(err, RuleError::MisplacedCondition(_)));
    }

    #[test]
    fn test_empty_group_clears_right_operand() {
        let node = build_str("age > 30 AND salary > 5 ()").unwrap();
        assert_eq!(node.op(), Some(LogicalOp::And));
        assert_eq!(node.left(), Some(&Node::operand("age > 30")));
        assert!(node.right().is_none());
        assert!(!node.is_complete());
    }

    #[test]
    fn test_empty_group_after_condition_is_ignored() {
        assert_eq!(build_str("age > 30 ()").unwrap(), Node::operand("age > 30"));
    }
}
