//! Token definitions for rule lines
//!
//! A rule document is line oriented, so tokenization happens one line at a
//! time. The tokens are defined using the logos derive macro. A line is
//! `<pattern> -> <replacement>`; everything that is not the arrow delimiter,
//! a placeholder or an escape sequence is literal text.

use logos::{Lexer, Logos};

/// Characters that may follow the `\` escape character.
pub const ESCAPABLE: &[char] = &['\\', '{', '}', '-', '>', '#'];

/// All possible tokens in a single rule line
#[derive(Logos, Debug, Clone, PartialEq, Eq)]
pub enum RuleToken {
    /// The pattern/replacement delimiter
    #[token("->")]
    Arrow,

    /// An escape sequence; carries the escaped character
    #[regex(r"\\[\\{}#>-]", escaped_char)]
    Escaped(char),

    /// A `{n}` placeholder; carries the raw index
    #[regex(r"\{[0-9]+\}", placeholder_index)]
    Placeholder(u32),

    // Bare braces are reserved for placeholders; the parser rejects them
    #[token("{")]
    OpenBrace,
    #[token("}")]
    CloseBrace,

    /// A lone `-` (an unescaped `-` that does not start the arrow)
    #[token("-")]
    Dash,

    /// Literal text (catch-all for non-reserved characters)
    #[regex(r"[^\\{}\-]+", |lex| lex.slice().to_owned())]
    Text(String),
}

fn escaped_char(lex: &mut Lexer<RuleToken>) -> Option<char> {
    lex.slice().chars().nth(1)
}

fn placeholder_index(lex: &mut Lexer<RuleToken>) -> Option<u32> {
    let slice = lex.slice();
    slice[1..slice.len() - 1].parse().ok()
}

impl RuleToken {
    /// Check if this token contributes literal text to a pattern or replacement
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            RuleToken::Text(_) | RuleToken::Dash | RuleToken::Escaped(_)
        )
    }

    /// Check if this token is the pattern/replacement delimiter
    pub fn is_delimiter(&self) -> bool {
        matches!(self, RuleToken::Arrow)
    }
}
