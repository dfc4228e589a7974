//! Scalar converters between host values and PowerShell literal text.
//!
//! Each native type has a pair of pure functions: `*_to_host` takes the value
//! as it came out of a literal (usually `Value::String` holding PowerShell
//! source) and produces a host value, `*_to_powershell` goes the other way and
//! always produces `Value::String` holding PowerShell source.
//!
//! The functions are wired into the registry table in [`crate::registry`].

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::{Number, Value};

pub const NULL_LITERAL: &str = "$null";
pub const TRUE_LITERAL: &str = "$true";
pub const FALSE_LITERAL: &str = "$false";
pub const EMPTY_ARRAY_LITERAL: &str = "@()";
pub const ZERO_LITERAL: &str = "0";

/// Host-side display pattern for dates.
pub const HOST_DATE_FORMAT: &str = "%m/%d/%Y %H:%M:%S";
/// ISO-8601 pattern used toward PowerShell (UTC, millisecond precision).
pub const POWERSHELL_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

// ---------------------------------------------------------------------------
// Object
// ---------------------------------------------------------------------------

pub fn object_to_host(value: &Value) -> Value {
    match value {
        Value::Null => Value::String(String::new()),
        Value::String(s) if s.is_empty() || s == NULL_LITERAL => Value::String(String::new()),
        other => Value::String(display_text(other)),
    }
}

pub fn object_to_powershell(value: &Value) -> Value {
    match value {
        Value::Null => literal(NULL_LITERAL),
        Value::String(s) if s.is_empty() => literal(NULL_LITERAL),
        other => Value::String(display_text(other)),
    }
}

// ---------------------------------------------------------------------------
// Boolean
// ---------------------------------------------------------------------------

/// Only the exact literal `$true` is true.
pub fn boolean_to_host(value: &Value) -> Value {
    match value {
        Value::Bool(b) => Value::Bool(*b),
        Value::String(s) => Value::Bool(s == TRUE_LITERAL),
        _ => Value::Bool(false),
    }
}

pub fn boolean_to_powershell(value: &Value) -> Value {
    let truthy = match value {
        Value::Bool(b) => *b,
        Value::String(s) => s.eq_ignore_ascii_case("true"),
        _ => false,
    };
    literal(if truthy { TRUE_LITERAL } else { FALSE_LITERAL })
}

// ---------------------------------------------------------------------------
// String
// ---------------------------------------------------------------------------

pub fn string_to_host(value: &Value) -> Value {
    match value {
        Value::Null => Value::String(String::new()),
        Value::String(s) => Value::String(s.replace("`\"", "\"")),
        other => Value::String(display_text(other)),
    }
}

pub fn string_to_powershell(value: &Value) -> Value {
    match value {
        Value::Null => Value::String(String::new()),
        Value::String(s) => Value::String(s.replace('"', "`\"")),
        other => Value::String(display_text(other).replace('"', "`\"")),
    }
}

// ---------------------------------------------------------------------------
// Array
// ---------------------------------------------------------------------------

/// `@(1,"two",3)` → `[1,"two",3]`. `$null`, empty and `@()` give `[]`.
pub fn array_to_host(value: &Value) -> Value {
    let text = match value {
        Value::Array(items) => return Value::Array(items.clone()),
        Value::Null => return Value::Array(Vec::new()),
        Value::String(s) => s.trim(),
        other => return Value::Array(vec![other.clone()]),
    };
    if text.is_empty() || text == NULL_LITERAL || text == EMPTY_ARRAY_LITERAL {
        return Value::Array(Vec::new());
    }

    let inner = text
        .strip_prefix("@(")
        .and_then(|rest| rest.strip_suffix(')'))
        .unwrap_or(text);

    let items = split_top_level(inner, ',')
        .into_iter()
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| match parse_number(item) {
            Some(n) if looks_numeric(item) => Value::Number(n),
            _ => Value::String(strip_quotes(item).to_string()),
        })
        .collect();
    Value::Array(items)
}

/// `["My","Funny"]` → `@("My","Funny")`. Non-arrays become one-element lists.
pub fn array_to_powershell(value: &Value) -> Value {
    let items: Vec<Value> = match value {
        Value::Array(items) => items.clone(),
        Value::Null => Vec::new(),
        other => vec![other.clone()],
    };
    if items.is_empty() {
        return literal(EMPTY_ARRAY_LITERAL);
    }

    let rendered: Vec<String> = items
        .iter()
        .map(|item| match item {
            Value::Number(n) => n.to_string(),
            Value::String(s) if looks_numeric(s.trim()) => s.trim().to_string(),
            other => format!("\"{}\"", display_text(other)),
        })
        .collect();
    Value::String(format!("@({})", rendered.join(",")))
}

// ---------------------------------------------------------------------------
// Date
// ---------------------------------------------------------------------------

/// Any accepted date → `MM/DD/YYYY HH:MM:SS`; invalid dates → `null`.
pub fn date_to_host(value: &Value) -> Value {
    match value.as_str().and_then(parse_date) {
        Some(dt) => Value::String(dt.format(HOST_DATE_FORMAT).to_string()),
        None => Value::Null,
    }
}

/// Any accepted date → ISO-8601 UTC; invalid dates → `$null`.
pub fn date_to_powershell(value: &Value) -> Value {
    match value.as_str().and_then(parse_date) {
        Some(dt) => Value::String(dt.format(POWERSHELL_DATE_FORMAT).to_string()),
        None => literal(NULL_LITERAL),
    }
}

/// Parse the date forms either side produces. Naive values are taken as UTC.
pub fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    let text = strip_quotes(text.trim());
    if text.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", HOST_DATE_FORMAT] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, pattern) {
            return Some(naive.and_utc());
        }
    }
    for pattern in ["%Y-%m-%d", "%m/%d/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(text, pattern) {
            return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
        }
    }
    None
}

// ---------------------------------------------------------------------------
// Number
// ---------------------------------------------------------------------------

/// PowerShell numeric text → JSON number, or `null` when it does not parse.
pub fn number_to_host(value: &Value) -> Value {
    match value {
        Value::Number(n) => Value::Number(n.clone()),
        Value::String(s) => parse_number(s.trim()).map_or(Value::Null, Value::Number),
        _ => Value::Null,
    }
}

/// Numbers and numeric strings → decimal text; anything else → `0`.
pub fn number_to_powershell(value: &Value) -> Value {
    let number = match value {
        Value::Number(n) => Some(n.clone()),
        Value::String(s) => parse_number(s.trim()),
        _ => None,
    };
    match number {
        Some(n) => Value::String(format_number(&n)),
        None => literal(ZERO_LITERAL),
    }
}

/// Parse decimal or `0x` hexadecimal text into a JSON number.
pub fn parse_number(text: &str) -> Option<Number> {
    if text.is_empty() {
        return None;
    }
    let (negative, unsigned) = match text.as_bytes()[0] {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };
    if let Some(hex) = unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let n = i64::from_str_radix(hex, 16).ok()?;
        let n = if negative { n.checked_neg()? } else { n };
        return Some(Number::from(n));
    }
    if !looks_numeric(unsigned) {
        return None;
    }
    if let Ok(i) = text.parse::<i64>() {
        return Some(Number::from(i));
    }
    text.parse::<f64>().ok().and_then(Number::from_f64)
}

/// Render a number without exponent or trailing fractional zeros.
pub fn format_number(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f.is_finite() => {
            let f = if f == 0.0 { 0.0 } else { f };
            if f.fract() == 0.0 && f.abs() < (i64::MAX as f64) {
                return (f as i64).to_string();
            }
            let s = format!("{}", f);
            if s.contains('.') {
                s.trim_end_matches('0').trim_end_matches('.').to_string()
            } else {
                s
            }
        }
        _ => ZERO_LITERAL.to_string(),
    }
}

/// Integers and decimals with an optional sign and exponent (`-1`, `3.14`, `1e3`).
pub fn looks_numeric(s: &str) -> bool {
    let rest = s.strip_prefix(['-', '+']).unwrap_or(s);
    if rest.is_empty() {
        return false;
    }
    let mut has_dot = false;
    let mut has_e = false;
    let mut prev = b' ';
    for (i, &b) in rest.as_bytes().iter().enumerate() {
        match b {
            b'0'..=b'9' => {}
            b'.' if !has_dot && !has_e => has_dot = true,
            b'e' | b'E' if !has_e && i > 0 => has_e = true,
            b'+' | b'-' if matches!(prev, b'e' | b'E') => {}
            _ => return false,
        }
        prev = b;
    }
    let last = rest.as_bytes()[rest.len() - 1];
    last.is_ascii_digit() || (last == b'.' && rest.len() > 1)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn literal(text: &str) -> Value {
    Value::String(text.to_string())
}

/// Text form of a host value, the way a string conversion of it would read.
fn display_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => format_number(n),
        other => other.to_string(),
    }
}

/// Remove one pair of matching surrounding quotes.
fn strip_quotes(text: &str) -> &str {
    for quote in ['"', '\''] {
        if text.len() >= 2 && text.starts_with(quote) && text.ends_with(quote) {
            return &text[1..text.len() - 1];
        }
    }
    text
}

/// Split on `separator` where it is not inside quotes or brackets.
fn split_top_level(text: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (i, c) in text.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None => match c {
                '"' | '\'' => quote = Some(c),
                '(' | '[' | '{' => depth += 1,
                ')' | ']' | '}' => depth = depth.saturating_sub(1),
                c if c == separator && depth == 0 => {
                    parts.push(&text[start..i]);
                    start = i + c.len_utf8();
                }
                _ => {}
            },
        }
    }
    parts.push(&text[start..]);
    parts
}
