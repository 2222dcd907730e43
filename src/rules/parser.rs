//! Parser for the rule-definition language
//!
//! Turns a rule document into an ordered [`RuleSet`]. The document is line
//! oriented: blank lines and lines whose first non-blank character is `#`
//! are ignored, and every other line must be `<pattern> -> <replacement>`
//! with exactly one unescaped arrow. Whitespace around the arrow belongs to
//! the syntax, not to the pattern or replacement; the replacement may be
//! empty (a deletion rule).
//!
//! Placeholders `{1}`..`{9}` capture text in patterns and are referenced
//! positionally in replacements. All errors are addressed by 1-based line
//! number.

use logos::Logos;
use serde::Serialize;
use std::fmt;

use crate::rules::tokens::{RuleToken, ESCAPABLE};

/// Maximum number of placeholders per pattern (and highest legal index)
pub const MAX_PLACEHOLDERS: usize = 9;

/// One segment of a compiled pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum PatternSegment {
    /// Exact text that must match at the current position
    Literal(String),
    /// A placeholder capturing a contiguous run of text (1-based slot)
    Capture(u8),
}

/// One segment of a compiled replacement
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ReplacementSegment {
    /// Text emitted verbatim
    Literal(String),
    /// A reference to a pattern capture (1-based slot)
    Reference(u8),
}

/// Whether a pattern matches exact text or contains wildcard segments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PatternKind {
    Literal,
    Wildcard,
}

/// An ordered pattern-to-replacement directive
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rule {
    /// The pattern in display form (escapes resolved, placeholders as `{n}`)
    pub pattern_text: String,
    /// The replacement in display form
    pub replacement_text: String,
    /// Compiled pattern segments
    pub pattern: Vec<PatternSegment>,
    /// Compiled replacement segments
    pub replacement: Vec<ReplacementSegment>,
    /// Literal or wildcard matching
    pub kind: PatternKind,
    /// Position among all rules from the same document; lower wins
    pub index: usize,
}

/// The ordered sequence of rules parsed from one document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RuleSet {
    pub rules: Vec<Rule>,
}

impl RuleSet {
    /// An empty rule set; applying it is the identity transformation
    pub fn empty() -> Self {
        RuleSet::default()
    }

    /// Iterate rules in application order
    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    /// Get the number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the set contains no rules
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Errors that can occur while parsing a rule document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The line is not a well-formed `<pattern> -> <replacement>` record
    MalformedRule { line: usize, reason: String },
    /// A pattern uses more than [`MAX_PLACEHOLDERS`] placeholders, or an
    /// index above the maximum
    TooManyPlaceholders { line: usize },
    /// A replacement references a placeholder the pattern does not capture
    UnknownPlaceholderReference { line: usize, index: u32 },
    /// The line ends in a lone `\`
    UnterminatedEscape { line: usize },
}

impl std::error::Error for ParseError {}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::MalformedRule { line, reason } => {
                write!(f, "malformed rule at line {}: {}", line, reason)
            }
            ParseError::TooManyPlaceholders { line } => {
                write!(
                    f,
                    "too many placeholders at line {}: at most {} are supported",
                    line, MAX_PLACEHOLDERS
                )
            }
            ParseError::UnknownPlaceholderReference { line, index } => {
                write!(
                    f,
                    "unknown placeholder reference {{{}}} at line {}",
                    index, line
                )
            }
            ParseError::UnterminatedEscape { line } => {
                write!(f, "unterminated escape at line {}", line)
            }
        }
    }
}

/// Parse a rule document into an ordered rule set
///
/// Pure function of the input text; rule order in the output matches source
/// order.
pub fn parse_rules(rule_text: &str) -> Result<RuleSet, ParseError> {
    let mut rules = Vec::new();
    for (line_idx, raw_line) in rule_text.lines().enumerate() {
        let line_no = line_idx + 1;
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let tokens = tokenize_line(line, line_no)?;
        let rule = build_rule(&tokens, line_no, rules.len())?;
        rules.push(rule);
    }
    Ok(RuleSet { rules })
}

/// Check escape sequences, then tokenize one rule line
fn tokenize_line(line: &str, line_no: usize) -> Result<Vec<RuleToken>, ParseError> {
    check_escapes(line, line_no)?;

    let mut tokens = Vec::new();
    for result in RuleToken::lexer(line) {
        match result {
            Ok(token) => tokens.push(token),
            Err(()) => {
                // Escape errors are caught above, so this is a stray token
                // such as an out-of-range placeholder index
                return Err(ParseError::MalformedRule {
                    line: line_no,
                    reason: "unrecognized token".to_string(),
                });
            }
        }
    }
    Ok(tokens)
}

/// Validate every `\` escape in the line before handing it to the lexer
fn check_escapes(line: &str, line_no: usize) -> Result<(), ParseError> {
    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            continue;
        }
        match chars.next() {
            None => return Err(ParseError::UnterminatedEscape { line: line_no }),
            Some(escaped) if ESCAPABLE.contains(&escaped) => {}
            Some(escaped) => {
                return Err(ParseError::MalformedRule {
                    line: line_no,
                    reason: format!("invalid escape sequence `\\{}`", escaped),
                });
            }
        }
    }
    Ok(())
}

/// Intermediate segment shared by the pattern and replacement builders
enum Piece {
    Literal(String),
    Placeholder(u32),
}

fn build_rule(tokens: &[RuleToken], line_no: usize, index: usize) -> Result<Rule, ParseError> {
    let arrows = tokens.iter().filter(|t| t.is_delimiter()).count();
    if arrows == 0 {
        return Err(ParseError::MalformedRule {
            line: line_no,
            reason: "missing `->` delimiter".to_string(),
        });
    }
    if arrows > 1 {
        return Err(ParseError::MalformedRule {
            line: line_no,
            reason: "more than one unescaped `->` delimiter".to_string(),
        });
    }

    let split = tokens
        .iter()
        .position(|t| t.is_delimiter())
        .unwrap_or(tokens.len());
    let lhs = collect_pieces(&tokens[..split], line_no)?;
    let rhs = collect_pieces(&tokens[split + 1..], line_no)?;

    let pattern = build_pattern(lhs, line_no)?;
    let replacement = build_replacement(rhs, &pattern, line_no)?;

    let kind = if pattern
        .iter()
        .any(|seg| matches!(seg, PatternSegment::Capture(_)))
    {
        PatternKind::Wildcard
    } else {
        PatternKind::Literal
    };

    Ok(Rule {
        pattern_text: pattern_display(&pattern),
        replacement_text: replacement_display(&replacement),
        pattern,
        replacement,
        kind,
        index,
    })
}

/// Collect tokens into merged literal and placeholder pieces, trimming the
/// whitespace that surrounds the arrow (and the line ends)
fn collect_pieces(tokens: &[RuleToken], line_no: usize) -> Result<Vec<Piece>, ParseError> {
    let mut pieces: Vec<Piece> = Vec::new();
    for token in tokens {
        match token {
            RuleToken::Text(text) => push_literal(&mut pieces, text),
            RuleToken::Dash => push_literal(&mut pieces, "-"),
            RuleToken::Escaped(c) => push_literal(&mut pieces, &c.to_string()),
            RuleToken::Placeholder(n) => pieces.push(Piece::Placeholder(*n)),
            RuleToken::OpenBrace => {
                return Err(ParseError::MalformedRule {
                    line: line_no,
                    reason: "unescaped `{` does not open a placeholder".to_string(),
                });
            }
            RuleToken::CloseBrace => {
                return Err(ParseError::MalformedRule {
                    line: line_no,
                    reason: "unescaped `}` outside a placeholder".to_string(),
                });
            }
            RuleToken::Arrow => unreachable!("delimiter removed before piece collection"),
        }
    }

    if let Some(Piece::Literal(first)) = pieces.first_mut() {
        *first = first.trim_start().to_string();
    }
    if matches!(pieces.first(), Some(Piece::Literal(s)) if s.is_empty()) {
        pieces.remove(0);
    }
    if let Some(Piece::Literal(last)) = pieces.last_mut() {
        *last = last.trim_end().to_string();
    }
    if matches!(pieces.last(), Some(Piece::Literal(s)) if s.is_empty()) {
        pieces.pop();
    }
    Ok(pieces)
}

fn push_literal(pieces: &mut Vec<Piece>, text: &str) {
    if let Some(Piece::Literal(last)) = pieces.last_mut() {
        last.push_str(text);
    } else {
        pieces.push(Piece::Literal(text.to_string()));
    }
}

fn build_pattern(pieces: Vec<Piece>, line_no: usize) -> Result<Vec<PatternSegment>, ParseError> {
    let mut segments = Vec::new();
    let mut seen = [false; MAX_PLACEHOLDERS];
    let mut placeholder_count = 0usize;

    for piece in pieces {
        match piece {
            Piece::Literal(text) => segments.push(PatternSegment::Literal(text)),
            Piece::Placeholder(n) => {
                placeholder_count += 1;
                if placeholder_count > MAX_PLACEHOLDERS || n as usize > MAX_PLACEHOLDERS {
                    return Err(ParseError::TooManyPlaceholders { line: line_no });
                }
                if n == 0 {
                    return Err(ParseError::MalformedRule {
                        line: line_no,
                        reason: "placeholder indices start at {1}".to_string(),
                    });
                }
                let slot = n as u8;
                if seen[(slot - 1) as usize] {
                    return Err(ParseError::MalformedRule {
                        line: line_no,
                        reason: format!("placeholder {{{}}} appears more than once", slot),
                    });
                }
                seen[(slot - 1) as usize] = true;
                segments.push(PatternSegment::Capture(slot));
            }
        }
    }

    if segments.is_empty() {
        return Err(ParseError::MalformedRule {
            line: line_no,
            reason: "empty pattern".to_string(),
        });
    }
    // A pattern of only placeholders would match a zero-width span and stall
    // the rewrite cursor
    if !segments
        .iter()
        .any(|seg| matches!(seg, PatternSegment::Literal(s) if !s.is_empty()))
    {
        return Err(ParseError::MalformedRule {
            line: line_no,
            reason: "pattern must contain literal text".to_string(),
        });
    }
    Ok(segments)
}

fn build_replacement(
    pieces: Vec<Piece>,
    pattern: &[PatternSegment],
    line_no: usize,
) -> Result<Vec<ReplacementSegment>, ParseError> {
    let mut segments = Vec::new();
    for piece in pieces {
        match piece {
            Piece::Literal(text) => segments.push(ReplacementSegment::Literal(text)),
            Piece::Placeholder(n) => {
                let captured = pattern
                    .iter()
                    .any(|seg| matches!(seg, PatternSegment::Capture(slot) if u32::from(*slot) == n));
                if !captured {
                    return Err(ParseError::UnknownPlaceholderReference {
                        line: line_no,
                        index: n,
                    });
                }
                segments.push(ReplacementSegment::Reference(n as u8));
            }
        }
    }
    Ok(segments)
}

fn pattern_display(segments: &[PatternSegment]) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment {
            PatternSegment::Literal(text) => out.push_str(text),
            PatternSegment::Capture(slot) => out.push_str(&format!("{{{}}}", slot)),
        }
    }
    out
}

fn replacement_display(segments: &[ReplacementSegment]) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment {
            ReplacementSegment::Literal(text) => out.push_str(text),
            ReplacementSegment::Reference(slot) => out.push_str(&format!("{{{}}}", slot)),
        }
    }
    out
}
