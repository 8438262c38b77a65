//! Leaf condition parsing and evaluation
//!
//! A leaf condition is `<field> <op> <literal>`, e.g. `age >= 30`,
//! `department == 'sales'` or `department in 'sales,marketing'`.

use crate::config::{AttributeWhitelist, CaseMode};
use crate::context::{Context, Value};
use crate::error::{Result, RuleError};
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

static CONDITION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)^(\w+)\s*(==|!=|>=|<=|>|<|in)\s*([0-9]+|'[^']+'|"[^"]+")\s*$"#)
        .expect("condition pattern is valid")
});

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOp {
    /// Equal (==)
    Equal,
    /// Not equal (!=)
    NotEqual,
    /// Greater than (>)
    Greater,
    /// Less than (<)
    Less,
    /// Greater than or equal (>=)
    GreaterEqual,
    /// Less than or equal (<=)
    LessEqual,
    /// List membership (in)
    In,
}

impl ComparisonOp {
    fn from_symbol(symbol: &str) -> Option<Self> {
        let op = match symbol {
            "==" => ComparisonOp::Equal,
            "!=" => ComparisonOp::NotEqual,
            ">" => ComparisonOp::Greater,
            "<" => ComparisonOp::Less,
            ">=" => ComparisonOp::GreaterEqual,
            "<=" => ComparisonOp::LessEqual,
            s if s.eq_ignore_ascii_case("in") => ComparisonOp::In,
            _ => return None,
        };
        Some(op)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            ComparisonOp::Equal => "==",
            ComparisonOp::NotEqual => "!=",
            ComparisonOp::Greater => ">",
            ComparisonOp::Less => "<",
            ComparisonOp::GreaterEqual => ">=",
            ComparisonOp::LessEqual => "<=",
            ComparisonOp::In => "in",
        }
    }

    fn holds(self, ordering: Ordering) -> bool {
        match self {
            ComparisonOp::Equal => ordering == Ordering::Equal,
            ComparisonOp::NotEqual => ordering != Ordering::Equal,
            ComparisonOp::Greater => ordering == Ordering::Greater,
            ComparisonOp::Less => ordering == Ordering::Less,
            ComparisonOp::GreaterEqual => ordering != Ordering::Less,
            ComparisonOp::LessEqual => ordering != Ordering::Greater,
            ComparisonOp::In => false,
        }
    }
}

/// Literal on the right-hand side of a condition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    Int(i64),
    Str(String),
    /// Comma-separated elements of an `in` literal, trimmed
    List(Vec<String>),
}

/// A parsed leaf condition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub field: String,
    pub op: ComparisonOp,
    pub literal: Literal,
}

impl Condition {
    /// Parse a leaf condition. Field and operator are lowercased; the
    /// literal keeps whatever case the tokenizer left it in.
    pub fn parse(text: &str) -> Result<Self> {
        let caps = CONDITION_RE
            .captures(text)
            .ok_or_else(|| RuleError::InvalidConditionSyntax(text.to_string()))?;

        let field = caps[1].to_lowercase();
        let op = ComparisonOp::from_symbol(&caps[2])
            .ok_or_else(|| RuleError::InvalidConditionSyntax(text.to_string()))?;
        let raw = &caps[3];

        let literal = if op == ComparisonOp::In {
            Literal::List(
                unquote(raw)
                    .split(',')
                    .map(|item| item.trim().to_string())
                    .collect(),
            )
        } else if is_quoted(raw) {
            Literal::Str(unquote(raw).to_string())
        } else {
            let value = raw.parse::<i64>().map_err(|_| {
                RuleError::InvalidConditionSyntax(format!("integer out of range in: {}", text))
            })?;
            Literal::Int(value)
        };

        Ok(Condition { field, op, literal })
    }

    /// Compare the context's value for this field against the literal
    pub fn matches(&self, actual: Option<&Value>, fold_case: bool) -> Result<bool> {
        let actual = match actual {
            Some(value) => value,
            None => return self.matches_absent(),
        };

        match (&self.literal, actual) {
            (Literal::List(items), Value::Str(s)) => {
                let s = fold(s, fold_case);
                Ok(items.iter().any(|item| item.as_str() == &*s))
            }
            (Literal::Int(expected), Value::Int(v)) => Ok(self.op.holds(v.cmp(expected))),
            (Literal::Str(expected), Value::Str(s)) => {
                let s = fold(s, fold_case);
                Ok(self.op.holds((*s).cmp(expected.as_str())))
            }
            _ => Err(RuleError::InvalidConditionSyntax(format!(
                "cannot compare {} value {} of '{}' with {}",
                actual.type_name(),
                actual,
                self.field,
                self
            ))),
        }
    }

    fn matches_absent(&self) -> Result<bool> {
        match self.op {
            ComparisonOp::Equal | ComparisonOp::In => Ok(false),
            ComparisonOp::NotEqual => Ok(true),
            _ => Err(RuleError::InvalidConditionSyntax(format!(
                "no value for '{}' to compare in: {}",
                self.field, self
            ))),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ", self.field, self.op.symbol())?;
        match &self.literal {
            Literal::Int(i) => write!(f, "{}", i),
            Literal::Str(s) => write!(f, "'{}'", s),
            Literal::List(items) => write!(f, "'{}'", items.join(",")),
        }
    }
}

fn is_quoted(raw: &str) -> bool {
    raw.starts_with('\'') || raw.starts_with('"')
}

fn unquote(raw: &str) -> &str {
    if is_quoted(raw) && raw.len() >= 2 {
        &raw[1..raw.len() - 1]
    } else {
        raw
    }
}

fn fold(s: &str, fold_case: bool) -> Cow<'_, str> {
    if fold_case {
        Cow::Owned(s.to_lowercase())
    } else {
        Cow::Borrowed(s)
    }
}

/// Evaluates leaf conditions against a whitelist captured at construction
#[derive(Debug, Clone, Copy)]
pub struct ConditionEvaluator<'a> {
    whitelist: &'a AttributeWhitelist,
    case_mode: CaseMode,
}

impl<'a> ConditionEvaluator<'a> {
    pub fn new(whitelist: &'a AttributeWhitelist, case_mode: CaseMode) -> Self {
        Self {
            whitelist,
            case_mode,
        }
    }

    /// Parse `text`, check its field against the whitelist, and compare
    pub fn evaluate(&self, text: &str, context: &Context) -> Result<bool> {
        let condition = Condition::parse(text)?;

        if !self.whitelist.contains(&condition.field) {
            return Err(RuleError::InvalidAttribute(condition.field));
        }

        condition.matches(context.lookup(&condition.field), self.case_mode.folds_context())
    }
}
