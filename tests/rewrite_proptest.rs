//! Property-based tests for the rewrite engine
//!
//! These pin the engine's global guarantees: determinism, termination with
//! full input coverage, identity on an empty rule set, and the output-size
//! bound.

use proptest::prelude::*;

use retex::engine::{apply, apply_with, ApplyError, RewriteOptions};
use retex::rules::{default_rule_set, parse_rules, RuleSet};

proptest! {
    /// Repeated application of the same rules to the same source is
    /// byte-identical
    #[test]
    fn apply_is_deterministic(source in ".*") {
        let rules = default_rule_set();
        let first = apply(&source, rules);
        let second = apply(&source, rules);
        prop_assert_eq!(first, second);
    }

    /// An empty rule set is the identity transformation
    #[test]
    fn empty_rule_set_is_identity(source in ".*") {
        let out = apply(&source, &RuleSet::empty()).unwrap();
        prop_assert_eq!(out, source);
    }

    /// The engine always terminates with output no larger than the
    /// configured bound (or fails with the guard error)
    #[test]
    fn output_is_bounded(source in ".*") {
        let options = RewriteOptions::default();
        match apply_with(&source, default_rule_set(), &options) {
            Ok(out) => prop_assert!(out.len() <= options.output_limit(source.len())),
            Err(ApplyError::RuleLimitExceeded { .. }) => {}
        }
    }

    /// The default rules never expand enough to trip the default guard
    #[test]
    fn default_rules_never_trip_the_guard(source in ".*") {
        prop_assert!(apply(&source, default_rule_set()).is_ok());
    }

    /// Literal-only rule sets conserve every unit of input: each source
    /// character ends up in the output either verbatim or via a replacement
    #[test]
    fn literal_rewrites_cover_the_whole_source(source in "[ab ]*") {
        let rules = parse_rules("ab -> AB\nb -> B").unwrap();
        let out = apply(&source, &rules).unwrap();
        // Both replacements keep length, so coverage implies equal length
        prop_assert_eq!(out.len(), source.len());
    }

    /// Sources without any rule-relevant text pass through unchanged
    #[test]
    fn irrelevant_text_passes_through(source in "[a-z0-9 +=^_$()]*") {
        // Default patterns all start with `\`, `{` or `}`
        let out = apply(&source, default_rule_set()).unwrap();
        prop_assert_eq!(out, source);
    }
}
