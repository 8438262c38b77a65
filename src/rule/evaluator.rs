//! Tree evaluator
//!
//! AND always evaluates both sides; OR stops at a true left side. Leaf
//! errors propagate unchanged, so a failing right side of an AND surfaces
//! even when the left side is already false.

use crate::context::Context;
use crate::error::{Result, RuleError};
use crate::rule::ast::{LogicalOp, Node};
use crate::rule::condition::ConditionEvaluator;

/// Evaluate a tree against a context.
///
/// The left spine is walked with an explicit stack, so the deep left-grouped
/// chains built by `combine` and long keyword chains do not grow the call
/// stack. Only right children recurse.
pub fn check(node: &Node, conditions: &ConditionEvaluator<'_>, context: &Context) -> Result<bool> {
    let mut spine: Vec<(LogicalOp, Option<&Node>)> = Vec::new();
    let mut base = node;

    let mut result = loop {
        match base {
            Node::Operator { op, left, right } => {
                spine.push((*op, right.as_deref()));
                base = child(left.as_deref(), *op, "left")?;
            }
            Node::Operand { condition } => {
                let result = conditions.evaluate(condition, context)?;
                tracing::debug!(condition = condition.as_str(), result, "evaluated operand");
                break result;
            }
        }
    };

    for (op, right) in spine.into_iter().rev() {
        tracing::debug!(op = op.as_str(), result, "evaluated left side");
        result = match op {
            LogicalOp::And => {
                let right_result = check(child(right, op, "right")?, conditions, context)?;
                tracing::debug!(op = op.as_str(), result = right_result, "evaluated right side");
                result && right_result
            }
            LogicalOp::Or if result => true,
            LogicalOp::Or => {
                let right_result = check(child(right, op, "right")?, conditions, context)?;
                tracing::debug!(op = op.as_str(), result = right_result, "evaluated right side");
                right_result
            }
        };
    }

    Ok(result)
}

fn child<'a>(node: Option<&'a Node>, op: LogicalOp, side: &'static str) -> Result<&'a Node> {
    node.ok_or(RuleError::IncompleteTree {
        op: op.as_str(),
        side,
    })
}
