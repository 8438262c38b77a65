//! Rule string tokenizer

use crate::config::CaseMode;
use crate::error::{Result, RuleError};
use once_cell::sync::Lazy;
use regex::Regex;

/// Keywords and parentheses; everything between them is a leaf condition
static SPLIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\band\b|\bor\b|\(|\)").expect("split pattern is valid"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    OpenParen,
    CloseParen,
    And,
    Or,
    Condition(String),
}

/// Split a rule string into tokens.
///
/// Surrounding whitespace is discarded. Leaf text is lowercased unless the
/// case mode preserves literals.
pub fn tokenize(rule: &str, mode: CaseMode) -> Result<Vec<Token>> {
    if rule.trim().is_empty() {
        return Err(RuleError::EmptyRule);
    }

    let mut tokens = Vec::new();
    let mut last = 0;

    for m in SPLIT_RE.find_iter(rule) {
        push_condition(&mut tokens, &rule[last..m.start()], mode);
        tokens.push(match m.as_str() {
            "(" => Token::OpenParen,
            ")" => Token::CloseParen,
            kw if kw.eq_ignore_ascii_case("and") => Token::And,
            _ => Token::Or,
        });
        last = m.end();
    }
    push_condition(&mut tokens, &rule[last..], mode);

    tracing::trace!(rule, count = tokens.len(), "tokenized rule");
    Ok(tokens)
}

fn push_condition(tokens: &mut Vec<Token>, text: &str, mode: CaseMode) {
    let text = text.trim();
    if text.is_empty() {
        return;
    }
    let text = if mode.lowercases_conditions() {
        text.to_lowercase()
    } else {
        text.to_string()
    };
    tokens.push(Token::Condition(text));
}
