//! Shared data model for the parser, serializer, and conversion layer.
//!
//! A literal such as `@{ Name = "value"; Count = 3 }` becomes an ordered list of
//! [`ParameterValue`]s. Order is significant and survives a parse/serialize
//! roundtrip, so the list is a `Vec` rather than a map.

use crate::error::{PsLiteralError, Result};
use crate::registry::PsType;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// The host-side value category of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NativeType {
    Object,
    String,
    Number,
    Boolean,
    Date,
    Array,
}

impl NativeType {
    pub const ALL: [NativeType; 6] = [
        NativeType::Object,
        NativeType::String,
        NativeType::Number,
        NativeType::Boolean,
        NativeType::Date,
        NativeType::Array,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NativeType::Object => "Object",
            NativeType::String => "String",
            NativeType::Number => "Number",
            NativeType::Boolean => "Boolean",
            NativeType::Date => "Date",
            NativeType::Array => "Array",
        }
    }
}

impl fmt::Display for NativeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NativeType {
    type Err = PsLiteralError;

    /// Case-insensitive lookup of a native type tag.
    fn from_str(s: &str) -> Result<Self> {
        NativeType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PsLiteralError::lookup(format!("unknown native type '{}'", s)))
    }
}

/// The object type a literal is cast to (`[PSCustomObject]@{...}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LiteralType {
    #[default]
    Hashtable,
    PSCustomObject,
    Object,
}

impl LiteralType {
    /// Lowercase descriptors accepted in a `[Type]` prefix, in match order.
    /// `pscustomobject` must precede `object` since matching is by suffix.
    pub const DESCRIPTORS: [(&'static str, LiteralType); 3] = [
        ("hashtable", LiteralType::Hashtable),
        ("pscustomobject", LiteralType::PSCustomObject),
        ("object", LiteralType::Object),
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LiteralType::Hashtable => "Hashtable",
            LiteralType::PSCustomObject => "PSCustomObject",
            LiteralType::Object => "Object",
        }
    }

    /// Resolve a (possibly namespaced) type descriptor such as
    /// `System.Management.Automation.PSCustomObject`.
    pub fn from_descriptor(descriptor: &str) -> Result<Self> {
        let lowered = descriptor.to_ascii_lowercase();
        LiteralType::DESCRIPTORS
            .iter()
            .find(|(suffix, _)| lowered.ends_with(suffix))
            .map(|(_, t)| *t)
            .ok_or_else(|| {
                let allowed: Vec<&str> = LiteralType::DESCRIPTORS.iter().map(|(d, _)| *d).collect();
                PsLiteralError::parse(format!(
                    "type '{}' is not allowed, allowed types are: {}",
                    descriptor,
                    allowed.join(", ")
                ))
            })
    }
}

impl fmt::Display for LiteralType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LiteralType {
    type Err = PsLiteralError;

    fn from_str(s: &str) -> Result<Self> {
        LiteralType::from_descriptor(s.trim())
    }
}

/// One named parameter of a literal.
///
/// `value` holds PowerShell source text (`Value::String`) after parsing and
/// before serialization. The conversion facade swaps it for a host value
/// (bool, number, array, ...) and back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterValue {
    pub name: String,
    #[serde(default)]
    pub value: Value,
    pub native_type: NativeType,
    #[serde(default)]
    pub is_runtime_parameter: bool,
}

impl ParameterValue {
    pub fn new(name: impl Into<String>, value: impl Into<Value>, native_type: NativeType) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            native_type,
            is_runtime_parameter: false,
        }
    }

    /// Build a value whose native type is derived from a PowerShell type name.
    pub fn with_ps_type(name: impl Into<String>, value: impl Into<Value>, ps_type: PsType) -> Self {
        Self::new(name, value, ps_type.native_type())
    }

    pub fn runtime(mut self) -> Self {
        self.is_runtime_parameter = true;
        self
    }

    /// The raw PowerShell text of this value, if it currently holds text.
    pub fn text(&self) -> Option<&str> {
        self.value.as_str()
    }
}

/// Result of parsing a literal.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParsedLiteral {
    #[serde(rename = "type", default)]
    pub literal_type: LiteralType,
    pub values: Vec<ParameterValue>,
}

/// Result of serializing a list of values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedLiteral {
    #[serde(rename = "type")]
    pub literal_type: LiteralType,
    pub code: String,
}
