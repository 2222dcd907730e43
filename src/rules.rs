//! Rule language module
//!
//! This module contains the rule-definition language: token definitions for
//! a single rule line, the line-oriented parser that produces an ordered
//! [`RuleSet`], and the built-in default rule document.

pub mod defaults;
pub mod parser;
pub mod tokens;

pub use defaults::{default_rule_set, DEFAULT_RULES, RULES_VERSION};
pub use parser::{
    parse_rules, ParseError, PatternKind, PatternSegment, ReplacementSegment, Rule, RuleSet,
    MAX_PLACEHOLDERS,
};
pub use tokens::RuleToken;
