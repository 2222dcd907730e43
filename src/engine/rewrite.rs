//! Left-to-right rewriting
//!
//! The scan maintains a byte cursor (always on a char boundary). At each
//! position the rules are tried in ascending order index; the first match is
//! applied and the cursor advances past the matched span. With no match the
//! single character at the cursor is copied verbatim. Every iteration
//! strictly advances the cursor, so the scan always terminates and no unit
//! of input is dropped.
//!
//! Replacement text is never rescanned, so output size is bounded by input
//! size times the largest per-match expansion; a configurable limit guards
//! against pathological rule sets regardless.

use std::fmt;

use crate::engine::matcher::{match_at, MatchCaptures};
use crate::rules::parser::{ReplacementSegment, RuleSet};

/// Default output-size multiplier relative to input size
pub const DEFAULT_MAX_GROWTH: usize = 32;

/// Floor for the output limit, so tiny inputs still have room to grow
const MIN_OUTPUT_ALLOWANCE: usize = 1024;

/// Tuning knobs for a rewrite pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewriteOptions {
    /// Maximum output size as a multiple of input size
    pub max_growth: usize,
}

impl Default for RewriteOptions {
    fn default() -> Self {
        RewriteOptions {
            max_growth: DEFAULT_MAX_GROWTH,
        }
    }
}

impl RewriteOptions {
    /// The output byte limit for an input of the given length
    pub fn output_limit(&self, input_len: usize) -> usize {
        input_len
            .saturating_mul(self.max_growth)
            .max(MIN_OUTPUT_ALLOWANCE)
    }
}

/// Errors that can occur while applying rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyError {
    /// The output exceeded the configured size limit
    RuleLimitExceeded { limit: usize, produced: usize },
}

impl std::error::Error for ApplyError {}

impl fmt::Display for ApplyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApplyError::RuleLimitExceeded { limit, produced } => write!(
                f,
                "rule expansion limit exceeded: produced {} bytes, limit is {} bytes",
                produced, limit
            ),
        }
    }
}

/// Apply a rule set to source text with default options
pub fn apply(source: &str, rules: &RuleSet) -> Result<String, ApplyError> {
    apply_with(source, rules, &RewriteOptions::default())
}

/// Apply a rule set to source text
///
/// Deterministic: identical `(source, rules, options)` always yields
/// identical output. An empty rule set returns the source unchanged.
pub fn apply_with(
    source: &str,
    rules: &RuleSet,
    options: &RewriteOptions,
) -> Result<String, ApplyError> {
    let limit = options.output_limit(source.len());
    let mut output = String::new();
    let mut cursor = 0;

    'scan: while cursor < source.len() {
        let rest = &source[cursor..];

        for rule in rules.iter() {
            if let Some(m) = match_at(rest, &rule.pattern) {
                // A zero-width match cannot advance the cursor; the parser
                // rejects such patterns, but hand-built rule sets could
                // still contain one
                if m.len == 0 {
                    continue;
                }
                substitute(&mut output, &rule.replacement, &m.captures);
                cursor += m.len;
                if output.len() > limit {
                    return Err(ApplyError::RuleLimitExceeded {
                        limit,
                        produced: output.len(),
                    });
                }
                continue 'scan;
            }
        }

        // No rule matched here: copy one character verbatim
        match rest.chars().next() {
            Some(c) => {
                output.push(c);
                cursor += c.len_utf8();
                if output.len() > limit {
                    return Err(ApplyError::RuleLimitExceeded {
                        limit,
                        produced: output.len(),
                    });
                }
            }
            None => break,
        }
    }

    Ok(output)
}

fn substitute(output: &mut String, replacement: &[ReplacementSegment], captures: &MatchCaptures) {
    for segment in replacement {
        match segment {
            ReplacementSegment::Literal(text) => output.push_str(text),
            ReplacementSegment::Reference(slot) => {
                output.push_str(captures.get(*slot).unwrap_or(""));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::parser::parse_rules;

    #[test]
    fn test_empty_rule_set_is_identity() {
        let out = apply("a $ \\frac{1}{2} $ b", &RuleSet::empty()).unwrap();
        assert_eq!(out, "a $ \\frac{1}{2} $ b");
    }

    #[test]
    fn test_verbatim_copy_of_unmatched_text() {
        let rules = parse_rules("x -> y").unwrap();
        assert_eq!(apply("abc", &rules).unwrap(), "abc");
    }

    #[test]
    fn test_first_rule_wins_at_a_position() {
        let rules = parse_rules("ab -> 1\na -> 2").unwrap();
        assert_eq!(apply("ab", &rules).unwrap(), "1");
        assert_eq!(apply("ac", &rules).unwrap(), "2c");
    }

    #[test]
    fn test_placeholder_round_trip() {
        let rules = parse_rules("A{1}B -> X{1}Y").unwrap();
        assert_eq!(apply("A123B", &rules).unwrap(), "X123Y");
    }

    #[test]
    fn test_replacement_is_not_rescanned() {
        // The replacement contains the pattern; without the no-rescan rule
        // this would loop forever
        let rules = parse_rules("a -> aa").unwrap();
        assert_eq!(apply("aaa", &rules).unwrap(), "aaaaaa");
    }

    #[test]
    fn test_repeated_reference_in_replacement() {
        let rules = parse_rules("<{1}> -> {1}{1}").unwrap();
        assert_eq!(apply("<ab>", &rules).unwrap(), "abab");
    }

    #[test]
    fn test_deletion_rule() {
        let rules = parse_rules("\\\\notag ->").unwrap();
        assert_eq!(apply("x \\notag y", &rules).unwrap(), "x  y");
    }

    #[test]
    fn test_cursor_advances_past_match_span() {
        // The matched `b` inside the span must not be rewritten again
        let rules = parse_rules("ab -> b\nb -> z").unwrap();
        assert_eq!(apply("ab", &rules).unwrap(), "b");
    }

    #[test]
    fn test_multibyte_source_passthrough() {
        let rules = parse_rules("alpha -> α").unwrap();
        assert_eq!(apply("alpha βγ", &rules).unwrap(), "α βγ");
    }

    #[test]
    fn test_rule_limit_exceeded() {
        let expansion = "x".repeat(64);
        let rules = parse_rules(&format!("a -> {}", expansion)).unwrap();
        let source = "a".repeat(100);

        let err = apply(&source, &rules).unwrap_err();
        let ApplyError::RuleLimitExceeded { limit, produced } = err;
        assert_eq!(limit, RewriteOptions::default().output_limit(source.len()));
        assert!(produced > limit);
    }

    #[test]
    fn test_limit_is_configurable() {
        let rules = parse_rules("a -> bb").unwrap();
        let source = "a".repeat(2000);
        let opts = RewriteOptions { max_growth: 2 };
        assert!(apply_with(&source, &rules, &opts).is_ok());

        let expansion = "x".repeat(8);
        let rules = parse_rules(&format!("a -> {}", expansion)).unwrap();
        assert!(matches!(
            apply_with(&source, &rules, &opts),
            Err(ApplyError::RuleLimitExceeded { .. })
        ));
    }

    #[test]
    fn test_limit_applies_to_verbatim_copies() {
        // Substitutions stay well under the limit; the trailing verbatim
        // text is what pushes the output past it
        let rules = parse_rules("a -> bbbb").unwrap();
        let source = format!("{}{}", "a".repeat(100), "y".repeat(1000));
        let opts = RewriteOptions { max_growth: 1 };
        assert!(matches!(
            apply_with(&source, &rules, &opts),
            Err(ApplyError::RuleLimitExceeded { .. })
        ));
    }

    #[test]
    fn test_output_limit_has_floor() {
        let opts = RewriteOptions::default();
        assert_eq!(opts.output_limit(0), 1024);
        assert_eq!(opts.output_limit(1024), 1024 * 32);
    }
}
