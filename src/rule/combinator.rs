//! Folds independently authored rules into one tree with OR

use crate::error::Result;
use crate::rule::ast::{LogicalOp, Node};

/// Build a tree per rule and fold them left-associatively with OR.
///
/// `parse` builds a single rule. An empty input has no tree; the first
/// failing rule fails the whole combination.
pub fn combine_with<I, S, F>(rules: I, mut parse: F) -> Result<Option<Node>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    F: FnMut(&str) -> Result<Node>,
{
    let mut combined: Option<Node> = None;

    for (index, rule) in rules.into_iter().enumerate() {
        let rule = rule.as_ref();
        let tree = parse(rule).map_err(|err| {
            tracing::warn!(index, rule, error = %err, "failed to parse rule for combination");
            err
        })?;

        combined = Some(match combined {
            None => tree,
            Some(acc) => Node::operator(LogicalOp::Or, acc, tree),
        });
    }

    Ok(combined)
}
