//! Parsed rule cache - keyed by case mode and rule text

use crate::config::CaseMode;
use crate::context::Context;
use crate::engine::RuleEngine;
use crate::error::Result;
use crate::rule::ast::Node;
use crate::rule::parser;
use ahash::AHashMap;
use once_cell::sync::Lazy;
use parking_lot::RwLock;

/// Global rule cache with fast hashing (ahash)
static RULE_CACHE: Lazy<RwLock<AHashMap<(CaseMode, String), Node>>> =
    Lazy::new(|| RwLock::new(AHashMap::with_capacity(256)));

/// Get or parse a rule string, using the cache for repeated rules.
/// Only successfully parsed trees are stored.
pub fn get_or_parse(rule: &str, mode: CaseMode) -> Result<Node> {
    let key = (mode, rule.to_string());

    {
        let cache = RULE_CACHE.read();
        if let Some(tree) = cache.get(&key) {
            tracing::trace!(rule, "rule cache hit");
            return Ok(tree.clone());
        }
    }

    let tree = parser::parse(rule, mode)?;

    {
        let mut cache = RULE_CACHE.write();
        cache.insert(key, tree.clone());
    }

    Ok(tree)
}

/// Check a rule string against a context with the given engine, parsing
/// through the cache
pub fn check_rule(engine: &RuleEngine, rule: &str, context: &Context) -> Result<bool> {
    let tree = get_or_parse(rule, engine.config().case_mode)?;
    engine.evaluate(&tree, context)
}

/// Clear the rule cache
pub fn clear_cache() {
    RULE_CACHE.write().clear();
}

/// Number of cached trees
pub fn cache_size() -> usize {
    RULE_CACHE.read().len()
}
