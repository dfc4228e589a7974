//! Punctuator lexer: finds every opener, closer, `=` and statement separator
//! in a piece of literal text.
//!
//! The lexer knows nothing about nesting. It compiles the punctuator table into
//! one alternation (two-character tokens first, so `@{` wins over `{`) and
//! hands out tokens with byte offsets. Interpreting a `"` as opener or closer,
//! or a `}` as the end of `@{` or `{`, is the parser's job.

use crate::error::Result;
use regex::Regex;

/// A paired opener/closer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Punctuator {
    pub opener: &'static str,
    pub closer: &'static str,
}

impl Punctuator {
    const fn pair(opener: &'static str, closer: &'static str) -> Self {
        Self { opener, closer }
    }

    /// Strings and here-strings switch the parser into string mode.
    pub fn is_string(&self) -> bool {
        matches!(self.opener, "@\"" | "@'" | "\"" | "'")
    }

    pub fn is_here_string(&self) -> bool {
        matches!(self.opener, "@\"" | "@'")
    }
}

/// Every paired punctuator, in lookup order.
pub const PUNCTUATORS: [Punctuator; 9] = [
    Punctuator::pair("@{", "}"),
    Punctuator::pair("@\"", "\"@"),
    Punctuator::pair("@'", "'@"),
    Punctuator::pair("\"", "\""),
    Punctuator::pair("'", "'"),
    Punctuator::pair("@(", ")"),
    Punctuator::pair("[", "]"),
    Punctuator::pair("{", "}"),
    Punctuator::pair("(", ")"),
];

pub const EQUALS: &str = "=";
const SEPARATORS: [&str; 2] = [";", "\n"];

/// Find the punctuator opened by `text`, if any.
pub fn opener(text: &str) -> Option<&'static Punctuator> {
    PUNCTUATORS.iter().find(|p| p.opener == text)
}

/// Whether `text` closes at least one punctuator.
pub fn is_closer(text: &str) -> bool {
    PUNCTUATORS.iter().any(|p| p.closer == text)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// An opener and/or closer from [`PUNCTUATORS`].
    Punctuator,
    /// The bare `=`.
    Equals,
    /// `;` or a line break.
    Separator,
}

/// A single match, borrowed from the scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
}

/// Compiled punctuator scanner. Build once, reuse for any number of inputs.
#[derive(Debug, Clone)]
pub struct Lexer {
    pattern: Regex,
}

impl Lexer {
    pub fn new() -> Result<Self> {
        let mut literals: Vec<&'static str> = Vec::new();
        for p in &PUNCTUATORS {
            for lit in [p.opener, p.closer] {
                if !literals.contains(&lit) {
                    literals.push(lit);
                }
            }
        }
        // Longest first so the alternation prefers `@{` over `{`, `"@` over `"`.
        literals.sort_by_key(|lit| std::cmp::Reverse(lit.len()));
        literals.push(EQUALS);
        literals.extend(SEPARATORS);

        let alternation: Vec<String> = literals.iter().map(|lit| regex::escape(lit)).collect();
        let pattern = Regex::new(&alternation.join("|"))?;
        Ok(Self { pattern })
    }

    /// All tokens in `text`, left to right.
    pub fn tokens<'a>(&'a self, text: &'a str) -> impl Iterator<Item = Token<'a>> + 'a {
        self.pattern.find_iter(text).map(|m| {
            let text = m.as_str();
            let kind = if text == EQUALS {
                TokenKind::Equals
            } else if SEPARATORS.contains(&text) {
                TokenKind::Separator
            } else {
                TokenKind::Punctuator
            };
            Token {
                kind,
                text,
                start: m.start(),
                end: m.end(),
            }
        })
    }
}
