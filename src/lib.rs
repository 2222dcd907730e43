//! # retex
//!
//! A rule-driven rewriter for LaTeX math markup.
//!
//! The pipeline has three stages: a rule-language parser that turns a plain
//! text rule document into an ordered [`rules::RuleSet`], a rewrite engine
//! that scans source text left to right applying the first matching rule at
//! each position, and an entry layer that wires the two together with a
//! built-in default rule set.
//!
//! Rule documents are line oriented:
//!
//! ```text
//! # comment line (ignored)
//! \\frac\{{1}\}\{{2}\} -> ({1})/({2})
//! \\partial -> diff
//! ```
//!
//! `{1}`..`{9}` are capturing placeholders, `->` separates pattern from
//! replacement, and `\` escapes `\`, `{`, `}`, `-`, `>` and `#` for literal
//! use.
//!
//! Every call is an independent, side-effect-free transformation; the only
//! static is the lazily parsed default rule set, which is immutable.

pub mod engine;
pub mod processor;
pub mod rules;

pub use processor::{default_replace_rules, entry, entry_with_rules, RetexError};
