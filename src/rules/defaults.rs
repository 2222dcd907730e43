//! Built-in replacement rules
//!
//! The default rule document rewrites common LaTeX math markup into Typst
//! markup. It is a versioned constant: changing it changes the default
//! behavior of [`crate::entry`] and is a breaking change.
//!
//! Ordering matters. Structural commands that consume brace groups come
//! before the bare-brace rules, and longer command names come before their
//! prefixes (`\ddots` before `\ddot`), because the first matching rule at a
//! position wins.

use once_cell::sync::Lazy;

use crate::rules::parser::{parse_rules, RuleSet};

/// The current default-rules version - change this when the document changes
pub const RULES_VERSION: &str = "v1";

/// The canonical default rule document
///
/// Guaranteed to parse with zero errors; suitable for display and editing by
/// a caller before re-submission.
pub const DEFAULT_RULES: &str = r"# retex built-in rewrite rules, v1.
# LaTeX math markup on the left, Typst markup on the right.

# Structural commands consume their brace groups.
\\frac\{{1}\}\{{2}\} -> ({1})/({2})
\\mathcal\{{1}\} -> cal({1})
\\vec\{{1}\} -> arrow({1})
\\label\{{1}\} ->
\\begin\{{1}\} ->
\\end\{{1}\} ->
\\left ->
\\right ->
\\notag ->

# Symbol renames. Longer names come before their prefixes.
\\varepsilon -> epsilon
\\partial -> diff
\\int -> integral
\\vec -> arrow
\\cdots -> dots.c
\\vdots -> dots.v
\\hdots -> dots.h
\\ddots -> dots.down
\\ddot -> dot.double
\\langle -> angle.l
\\rangle -> angle.r

# Bare brace groups become parenthesised groups.
\{ -> (
\} -> )
";

static DEFAULT_RULE_SET: Lazy<RuleSet> =
    Lazy::new(|| parse_rules(DEFAULT_RULES).expect("built-in default rules must parse"));

/// The parsed form of [`DEFAULT_RULES`], parsed once and cached
pub fn default_rule_set() -> &'static RuleSet {
    &DEFAULT_RULE_SET
}
