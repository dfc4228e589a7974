//! Literal serializer: ordered [`ParameterValue`] list → PowerShell source text.
//!
//! Output shape is fixed: `[Type]@{"k1"=v1; "k2"=v2}`, with the `[Type]`
//! prefix left out for Hashtable. Keys are always double-quoted. String values
//! are wrapped in double quotes as-is; embedded quotes are *not* escaped here
//! (run [`crate::to_powershell`] first if they need to be). Every other value
//! is emitted as its raw text.
//!
//! # Example
//! ```
//! use psliteral_core::{from_values, LiteralType, NativeType, ParameterValue};
//!
//! let values = vec![
//!     ParameterValue::new("Name", "value", NativeType::String),
//!     ParameterValue::new("Count", "3", NativeType::Number),
//! ];
//! let out = from_values(&values, LiteralType::PSCustomObject);
//! assert_eq!(out.code, r#"[PSCustomObject]@{"Name"="value"; "Count"=3}"#);
//! ```

use crate::converters::{format_number, FALSE_LITERAL, NULL_LITERAL, TRUE_LITERAL};
use crate::types::{LiteralType, NativeType, ParameterValue, SerializedLiteral};
use serde_json::Value;
use std::borrow::Cow;

const ENTRY_SEPARATOR: &str = "; ";

/// Render `values` as a literal of type `literal_type`.
pub fn from_values(values: &[ParameterValue], literal_type: LiteralType) -> SerializedLiteral {
    let mut code = String::new();
    if literal_type != LiteralType::Hashtable {
        code.push('[');
        code.push_str(literal_type.as_str());
        code.push(']');
    }
    code.push_str("@{");
    for (i, pv) in values.iter().enumerate() {
        if i > 0 {
            code.push_str(ENTRY_SEPARATOR);
        }
        encode_entry(pv, &mut code);
    }
    code.push('}');

    tracing::debug!(%literal_type, values = values.len(), "serialized literal");
    SerializedLiteral { literal_type, code }
}

fn encode_entry(pv: &ParameterValue, out: &mut String) {
    out.push('"');
    out.push_str(&pv.name);
    out.push_str("\"=");
    let text = raw_text(&pv.value);
    if pv.native_type == NativeType::String {
        out.push('"');
        out.push_str(&text);
        out.push('"');
    } else {
        out.push_str(&text);
    }
}

/// The PowerShell text a stored value stands for. Parsed values are already
/// text; host values that slipped through unconverted get their literal form.
fn raw_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s),
        Value::Null => Cow::Borrowed(NULL_LITERAL),
        Value::Bool(true) => Cow::Borrowed(TRUE_LITERAL),
        Value::Bool(false) => Cow::Borrowed(FALSE_LITERAL),
        Value::Number(n) => Cow::Owned(format_number(n)),
        other => Cow::Owned(other.to_string()),
    }
}
