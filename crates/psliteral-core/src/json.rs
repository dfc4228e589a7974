//! JSON string entry points for callers that cannot hold Rust values
//! (the CLI, the WASM bindings).

use crate::conversion::{to_host_all, to_powershell_all};
use crate::error::{PsLiteralError, Result};
use crate::parser::Parser;
use crate::serializer::from_values;
use crate::types::{LiteralType, ParameterValue, ParsedLiteral};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Which way [`convert_json`] moves values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Host,
    PowerShell,
}

impl FromStr for Direction {
    type Err = PsLiteralError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "host" => Ok(Direction::Host),
            "powershell" | "ps" => Ok(Direction::PowerShell),
            other => Err(PsLiteralError::lookup(format!(
                "unknown direction '{}', expected 'host' or 'powershell'",
                other
            ))),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Host => "host",
            Direction::PowerShell => "powershell",
        })
    }
}

/// Either a bare value list or a `{ "type": ..., "values": [...] }` document.
#[derive(Deserialize)]
#[serde(untagged)]
enum ValuesDocument {
    List(Vec<ParameterValue>),
    Literal(ParsedLiteral),
}

impl ValuesDocument {
    fn into_parts(self) -> (Option<LiteralType>, Vec<ParameterValue>) {
        match self {
            ValuesDocument::List(values) => (None, values),
            ValuesDocument::Literal(parsed) => (Some(parsed.literal_type), parsed.values),
        }
    }
}

/// Parse literal text and return `{ "type": ..., "values": [...] }` as JSON.
pub fn parse_to_json(parser: &Parser, text: &str, pretty: bool) -> Result<String> {
    let parsed = parser.from_string(text)?;
    Ok(if pretty {
        serde_json::to_string_pretty(&parsed)?
    } else {
        serde_json::to_string(&parsed)?
    })
}

/// Serialize a JSON value list (or parsed-literal document) into literal code.
///
/// An explicit `literal_type` wins over the document's own `type`.
pub fn serialize_json(json: &str, literal_type: Option<LiteralType>) -> Result<String> {
    let document: ValuesDocument = serde_json::from_str(json)?;
    let (document_type, values) = document.into_parts();
    let literal_type = literal_type.or(document_type).unwrap_or_default();
    Ok(from_values(&values, literal_type).code)
}

/// Convert every value of a JSON list (or document) and return the list as JSON.
pub fn convert_json(json: &str, direction: Direction, pretty: bool) -> Result<String> {
    let document: ValuesDocument = serde_json::from_str(json)?;
    let (_, mut values) = document.into_parts();
    match direction {
        Direction::Host => to_host_all(&mut values)?,
        Direction::PowerShell => to_powershell_all(&mut values)?,
    }
    Ok(if pretty {
        serde_json::to_string_pretty(&values)?
    } else {
        serde_json::to_string(&values)?
    })
}
