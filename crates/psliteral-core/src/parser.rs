//! Literal parser: PowerShell `@{ ... }` source text → ordered [`ParameterValue`] list.
//!
//! Parsing runs in two phases:
//!
//! 1. **Scan**: starting right after the first `@{`, the lexer's token stream
//!    drives an explicit stack of open punctuators until the `}` that closes
//!    that `@{`. Separators (`;`, line breaks) and `=` only count at the top
//!    level, outside any string, so the scan yields *logical lines* together
//!    with the offset of their key-starting `=`, if any. Text after the
//!    closing `}` is ignored.
//! 2. **Assemble**: each logical line either starts a new key (and its value
//!    type is inferred from the first characters of the value) or continues the
//!    value currently open.
//!
//! # Type inference
//!
//! Checked in order, first match wins:
//!
//! - quoted text → `String` (quotes stripped, `` `" `` unescaped)
//! - leading sign or digit → `Number`, kept as written (`0x34b6d6` stays hex)
//! - exactly `$true` / `$false` (lowercase) → `Boolean`
//! - anything else → `Object`, kept verbatim (here-strings, nested literals,
//!   casts, expressions, script blocks)
//!
//! Errors are atomic: nothing is returned unless the whole input parses.

use crate::error::{PsLiteralError, Result};
use crate::lexer::{self, Lexer, Punctuator, Token, TokenKind};
use crate::types::{LiteralType, NativeType, ParameterValue, ParsedLiteral};
use regex::Regex;

const BODY_OPENER: &str = "@{";
const BODY_CLOSER: &str = "}";

/// Parse a literal with a freshly built [`Parser`].
///
/// Prefer keeping a `Parser` around when parsing many inputs; it compiles its
/// patterns once.
pub fn from_string(text: &str) -> Result<ParsedLiteral> {
    Parser::new()?.from_string(text)
}

/// Reusable literal parser. Holds only compiled patterns, so `&Parser` can be
/// shared between threads; every call keeps its own nesting state.
#[derive(Debug, Clone)]
pub struct Parser {
    lexer: Lexer,
    type_prefix: Regex,
}

/// A top-level statement of the literal body, with the byte offset of its
/// key-starting `=` relative to `text`.
#[derive(Debug)]
struct LogicalLine<'a> {
    text: &'a str,
    equals: Option<usize>,
}

impl Parser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            lexer: Lexer::new()?,
            type_prefix: Regex::new(r"^\[([\w.]+)\]@\{")?,
        })
    }

    /// Parse `text` into its literal type and ordered values.
    ///
    /// Text without an `@{` block (including the empty string) yields an empty
    /// Hashtable.
    pub fn from_string(&self, text: &str) -> Result<ParsedLiteral> {
        let trimmed = text.trim();
        let literal_type = self.detect_type(trimmed)?;

        let Some(open) = trimmed.find(BODY_OPENER) else {
            return Ok(ParsedLiteral {
                literal_type,
                values: Vec::new(),
            });
        };

        let rest = trimmed[open + BODY_OPENER.len()..].replace("\r\n", "\n");
        let lines = self.logical_lines(&rest)?;
        let values = assemble(&lines)?;

        tracing::debug!(%literal_type, values = values.len(), "parsed literal");
        Ok(ParsedLiteral {
            literal_type,
            values,
        })
    }

    /// Resolve an optional `[Type]` prefix. No prefix means Hashtable.
    fn detect_type(&self, text: &str) -> Result<LiteralType> {
        match self.type_prefix.captures(text) {
            Some(caps) => LiteralType::from_descriptor(&caps[1]),
            None => Ok(LiteralType::default()),
        }
    }

    /// Split the text following the opening `@{` into top-level statements,
    /// validating punctuator nesting along the way. Stops at the `}` that
    /// closes the literal.
    fn logical_lines<'a>(&self, body: &'a str) -> Result<Vec<LogicalLine<'a>>> {
        let mut stack: Vec<&'static Punctuator> = Vec::new();
        let mut lines = Vec::new();
        let mut line_start = 0;
        let mut equals = None;

        for token in self.lexer.tokens(body) {
            if let Some(open) = stack.last().filter(|p| p.is_string()) {
                if closes_string(open, &token, body) {
                    stack.pop();
                }
                continue;
            }

            match token.kind {
                TokenKind::Separator if stack.is_empty() => {
                    lines.push(LogicalLine {
                        text: &body[line_start..token.start],
                        equals: equals.take(),
                    });
                    line_start = token.end;
                }
                TokenKind::Equals if stack.is_empty() && equals.is_none() => {
                    equals = Some(token.start - line_start);
                }
                TokenKind::Punctuator if stack.is_empty() && token.text == BODY_CLOSER => {
                    lines.push(LogicalLine {
                        text: &body[line_start..token.start],
                        equals,
                    });
                    return Ok(lines);
                }
                TokenKind::Punctuator => step_nesting(&mut stack, token.text)?,
                _ => {}
            }
        }

        let (closer, opener) = match stack.last() {
            Some(open) => (open.closer, open.opener),
            None => (BODY_CLOSER, BODY_OPENER),
        };
        Err(PsLiteralError::parse(format!(
            "missing closing tag '{}' for '{}'",
            closer, opener
        )))
    }
}

/// Apply a punctuator seen outside any string to the nesting stack.
fn step_nesting(stack: &mut Vec<&'static Punctuator>, text: &str) -> Result<()> {
    if stack.last().is_some_and(|top| top.closer == text) {
        stack.pop();
        return Ok(());
    }
    if let Some(p) = lexer::opener(text) {
        stack.push(p);
        return Ok(());
    }
    // A here-string closer that closes nothing is a plain quote followed by
    // an `@` that belongs to the string's content.
    if let Some(quote) = text.strip_suffix('@').and_then(lexer::opener) {
        stack.push(quote);
        return Ok(());
    }
    if lexer::is_closer(text) {
        let message = match stack.last() {
            Some(top) => format!("we received '{}' but we expect '{}'", text, top.closer),
            None => format!("we received '{}' but we don't expect a closing tag", text),
        };
        return Err(PsLiteralError::parse(message));
    }
    Ok(())
}

/// Does `token` end the string opened by `open`?
///
/// Here-strings need their exact closer. Plain quotes close on any token that
/// contains the quote character (`"`, `"@`, `@"`). Inside double quotes a
/// backtick escapes the quote; inside single quotes a backtick is literal.
fn closes_string(open: &Punctuator, token: &Token<'_>, body: &str) -> bool {
    if open.is_here_string() {
        return token.text == open.closer;
    }
    let Some(offset) = token.text.find(open.closer) else {
        return false;
    };
    if open.closer != "\"" {
        return true;
    }
    let backticks = body[..token.start + offset]
        .chars()
        .rev()
        .take_while(|&c| c == '`')
        .count();
    backticks % 2 == 0
}

/// The inferred shape of a value while its lines are being collected.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Shape {
    Quoted { quote: char, closed: bool },
    Number,
    Boolean,
    Object,
}

#[derive(Debug)]
struct Draft {
    name: String,
    shape: Shape,
    text: String,
}

impl Draft {
    fn start(name: String, raw: &str) -> Self {
        let text = raw.trim();
        let shape = infer_shape(text);
        let text = match shape {
            Shape::Quoted { closed: true, .. } => &text[1..text.len() - 1],
            Shape::Quoted { closed: false, .. } => &text[1..],
            _ => text,
        };
        Self {
            name,
            shape,
            text: text.to_string(),
        }
    }

    fn extend(&mut self, line: &str) {
        match &mut self.shape {
            Shape::Quoted { quote, closed } if !*closed => {
                let line = line.trim_end();
                self.text.push('\n');
                match line.strip_suffix(*quote) {
                    Some(rest) => {
                        self.text.push_str(rest);
                        *closed = true;
                    }
                    None => self.text.push_str(line),
                }
            }
            Shape::Object => {
                self.text.push('\n');
                self.text.push_str(line.trim_end());
            }
            _ => {}
        }
    }

    fn finish(self) -> ParameterValue {
        let (native_type, value) = match self.shape {
            Shape::Quoted { .. } => (NativeType::String, self.text.replace("`\"", "\"")),
            Shape::Number => (NativeType::Number, self.text),
            Shape::Boolean => (NativeType::Boolean, self.text),
            Shape::Object => (NativeType::Object, self.text.trim().to_string()),
        };
        ParameterValue::new(self.name, value, native_type)
    }
}

fn infer_shape(text: &str) -> Shape {
    let mut chars = text.chars();
    let first = chars.next();

    if let Some(quote @ ('"' | '\'')) = first {
        // A lone `"@` / `'@` is a here-string closer, not a string.
        if text != format!("{}@", quote) {
            return Shape::Quoted {
                quote,
                closed: text.len() >= 2 && text.ends_with(quote),
            };
        }
    }

    let leading_digit = match first {
        Some('+' | '-') => chars.next().is_some_and(|c| c.is_ascii_digit()),
        Some(c) => c.is_ascii_digit(),
        None => false,
    };
    if leading_digit {
        return Shape::Number;
    }

    if text == "$true" || text == "$false" {
        return Shape::Boolean;
    }

    Shape::Object
}

/// Strip quotes from a quoted key, or validate a bare identifier key.
fn parse_key(raw: &str) -> Result<String> {
    let key = raw.trim();

    for quote in ['"', '\''] {
        if key.len() >= 2 && key.starts_with(quote) && key.ends_with(quote) {
            return Ok(key[1..key.len() - 1].to_string());
        }
    }

    let mut chars = key.chars();
    let valid = match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => chars.all(|c| c.is_alphanumeric() || c == '_'),
        _ => false,
    };
    if !valid {
        return Err(PsLiteralError::parse(format!(
            "not able to parse key name '{}'",
            key
        )));
    }
    Ok(key.to_string())
}

/// Turn logical lines into values: lines with a top-level `=` open a new key,
/// the rest continue the value before them.
fn assemble(lines: &[LogicalLine<'_>]) -> Result<Vec<ParameterValue>> {
    let mut values: Vec<ParameterValue> = Vec::new();
    let mut draft: Option<Draft> = None;

    for line in lines {
        match line.equals {
            Some(eq) => {
                let name = parse_key(&line.text[..eq])?;
                if let Some(done) = draft.take() {
                    values.push(done.finish());
                }
                if values.iter().any(|v| v.name == name) {
                    return Err(PsLiteralError::parse(format!("duplicate key '{}'", name)));
                }
                tracing::trace!(key = %name, "found key");
                draft = Some(Draft::start(name, &line.text[eq + 1..]));
            }
            None if line.text.trim().is_empty() => {}
            None => match draft.as_mut() {
                Some(open) => open.extend(line.text),
                None => tracing::trace!(line = line.text, "ignoring text before first key"),
            },
        }
    }

    if let Some(done) = draft {
        values.push(done.finish());
    }
    Ok(values)
}
