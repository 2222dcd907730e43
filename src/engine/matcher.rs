//! Anchored pattern matching
//!
//! A standalone matcher for compiled patterns: given a text and a pattern,
//! decide whether the pattern matches starting exactly at the beginning of
//! the text, and if so how many bytes it spans and what each placeholder
//! captured.
//!
//! ## Capture semantics
//!
//! A capture takes the shortest run of text (non-greedy) that lets the
//! remainder of the pattern match contiguously. The matcher backtracks: if
//! the first occurrence of the next literal segment leaves the rest of the
//! pattern unmatchable, later occurrences are tried in order. A capture with
//! no following literal segment captures the empty string.

use crate::rules::parser::{PatternSegment, MAX_PLACEHOLDERS};

/// Text captured by each placeholder slot during a match
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchCaptures<'src> {
    slots: [Option<&'src str>; MAX_PLACEHOLDERS],
}

impl<'src> MatchCaptures<'src> {
    /// Get the text captured by a 1-based placeholder slot
    pub fn get(&self, slot: u8) -> Option<&'src str> {
        let idx = usize::from(slot).checked_sub(1)?;
        self.slots.get(idx).copied().flatten()
    }

    fn set(&mut self, slot: u8, text: &'src str) {
        // Out-of-range slots come only from hand-built patterns; ignore them
        if let Some(cell) = usize::from(slot)
            .checked_sub(1)
            .and_then(|idx| self.slots.get_mut(idx))
        {
            *cell = Some(text);
        }
    }
}

/// A successful anchored match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match<'src> {
    /// Number of bytes the full pattern spans from the start of the text
    pub len: usize,
    /// Placeholder captures, borrowed from the matched text
    pub captures: MatchCaptures<'src>,
}

/// Match a compiled pattern starting exactly at the beginning of `text`
pub fn match_at<'src>(text: &'src str, pattern: &[PatternSegment]) -> Option<Match<'src>> {
    let mut captures = MatchCaptures::default();
    let len = match_segments(text, pattern, &mut captures)?;
    Some(Match { len, captures })
}

fn match_segments<'src>(
    text: &'src str,
    segments: &[PatternSegment],
    captures: &mut MatchCaptures<'src>,
) -> Option<usize> {
    let (segment, rest) = match segments.split_first() {
        None => return Some(0),
        Some(parts) => parts,
    };

    match segment {
        PatternSegment::Literal(literal) => {
            let tail = text.strip_prefix(literal.as_str())?;
            let matched = match_segments(tail, rest, captures)?;
            Some(literal.len() + matched)
        }
        PatternSegment::Capture(slot) => match rest.first() {
            Some(PatternSegment::Literal(literal)) => {
                // Shortest capture first; backtrack through later occurrences
                // of the next literal until the remainder matches
                for (pos, _) in text.match_indices(literal.as_str()) {
                    captures.set(*slot, &text[..pos]);
                    let after = &text[pos + literal.len()..];
                    if let Some(matched) = match_segments(after, &rest[1..], captures) {
                        return Some(pos + literal.len() + matched);
                    }
                }
                None
            }
            // Trailing capture, or a capture directly followed by another
            // capture: the shortest run is the empty string
            _ => {
                captures.set(*slot, &text[..0]);
                match_segments(text, rest, captures)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(s: &str) -> PatternSegment {
        PatternSegment::Literal(s.to_string())
    }

    fn cap(slot: u8) -> PatternSegment {
        PatternSegment::Capture(slot)
    }

    #[test]
    fn test_literal_match_is_anchored() {
        let pattern = vec![lit("ab")];
        assert_eq!(match_at("abc", &pattern).map(|m| m.len), Some(2));
        assert!(match_at("xab", &pattern).is_none());
    }

    #[test]
    fn test_simple_capture() {
        let pattern = vec![lit("A"), cap(1), lit("B")];
        let m = match_at("A123B tail", &pattern).unwrap();
        assert_eq!(m.len, "A123B".len());
        assert_eq!(m.captures.get(1), Some("123"));
    }

    #[test]
    fn test_capture_is_non_greedy() {
        let pattern = vec![lit("a"), cap(1), lit("c")];
        let m = match_at("abcbc", &pattern).unwrap();
        // Shortest run: stops at the first `c`
        assert_eq!(m.len, 3);
        assert_eq!(m.captures.get(1), Some("b"));
    }

    #[test]
    fn test_capture_backtracks_past_false_stops() {
        // The first `b` leaves no `c` immediately after; the matcher must
        // retry with the second `b`
        let pattern = vec![lit("a"), cap(1), lit("b"), lit("c")];
        let m = match_at("abxbc", &pattern).unwrap();
        assert_eq!(m.len, 5);
        assert_eq!(m.captures.get(1), Some("bx"));
    }

    #[test]
    fn test_capture_may_be_empty() {
        let pattern = vec![lit("A"), cap(1), lit("B")];
        let m = match_at("AB", &pattern).unwrap();
        assert_eq!(m.len, 2);
        assert_eq!(m.captures.get(1), Some(""));
    }

    #[test]
    fn test_trailing_capture_is_empty() {
        let pattern = vec![lit("a"), cap(1)];
        let m = match_at("abc", &pattern).unwrap();
        assert_eq!(m.len, 1);
        assert_eq!(m.captures.get(1), Some(""));
    }

    #[test]
    fn test_missing_trailing_literal_fails() {
        let pattern = vec![lit("a"), cap(1), lit("z")];
        assert!(match_at("abc", &pattern).is_none());
    }

    #[test]
    fn test_two_captures() {
        let pattern = vec![lit("\\frac{"), cap(1), lit("}{"), cap(2), lit("}")];
        let m = match_at("\\frac{df}{dx} rest", &pattern).unwrap();
        assert_eq!(m.len, "\\frac{df}{dx}".len());
        assert_eq!(m.captures.get(1), Some("df"));
        assert_eq!(m.captures.get(2), Some("dx"));
    }

    #[test]
    fn test_unicode_capture() {
        let pattern = vec![lit("«"), cap(1), lit("»")];
        let m = match_at("«αβ» tail", &pattern).unwrap();
        assert_eq!(m.captures.get(1), Some("αβ"));
        assert_eq!(m.len, "«αβ»".len());
    }

    #[test]
    fn test_unset_slot_is_none() {
        let pattern = vec![lit("a")];
        let m = match_at("a", &pattern).unwrap();
        assert_eq!(m.captures.get(1), None);
        assert_eq!(m.captures.get(0), None);
    }
}
