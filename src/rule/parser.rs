//! Rule string parser: tokenizer followed by the tree builder

use crate::config::CaseMode;
use crate::error::Result;
use crate::rule::ast::Node;
use crate::rule::builder;
use crate::rule::tokenizer::tokenize;

/// Parse a rule string into a tree
pub fn parse(rule: &str, mode: CaseMode) -> Result<Node> {
    let tokens = tokenize(rule, mode)?;
    builder::build(tokens)
}
