//! Entry points for the rewrite pipeline
//!
//! This module is the public boundary: it resolves the rule document
//! (caller-supplied or built-in), parses it, applies it, and surfaces any
//! failure as a single descriptive error. Callers display the error text
//! verbatim; no partial output is returned on failure.

use std::fmt;

use crate::engine::rewrite::{apply, ApplyError};
use crate::rules::defaults::{default_rule_set, DEFAULT_RULES};
use crate::rules::parser::{parse_rules, ParseError, RuleSet};

/// Errors surfaced at the pipeline boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetexError {
    /// The rule document failed to parse
    Parse(ParseError),
    /// The rewrite pass failed
    Apply(ApplyError),
}

impl std::error::Error for RetexError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RetexError::Parse(e) => Some(e),
            RetexError::Apply(e) => Some(e),
        }
    }
}

impl fmt::Display for RetexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The inner message is the boundary contract; render it unchanged
        match self {
            RetexError::Parse(e) => write!(f, "{}", e),
            RetexError::Apply(e) => write!(f, "{}", e),
        }
    }
}

impl From<ParseError> for RetexError {
    fn from(e: ParseError) -> Self {
        RetexError::Parse(e)
    }
}

impl From<ApplyError> for RetexError {
    fn from(e: ApplyError) -> Self {
        RetexError::Apply(e)
    }
}

/// Transform source text using the built-in default rules
pub fn entry(source: &str) -> Result<String, RetexError> {
    Ok(apply(source, default_rule_set())?)
}

/// Transform source text using a caller-supplied rule document
pub fn entry_with_rules(source: &str, rules_text: &str) -> Result<String, RetexError> {
    let rules = parse_rules(rules_text)?;
    Ok(apply(source, &rules)?)
}

/// The built-in rule document, suitable for display and editing
pub fn default_replace_rules() -> &'static str {
    DEFAULT_RULES
}

/// Serialize a parsed rule set as pretty JSON (used by the CLI rule dump)
pub fn rules_to_json(rules: &RuleSet) -> serde_json::Result<String> {
    serde_json::to_string_pretty(rules)
}
