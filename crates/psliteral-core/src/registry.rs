//! Type registry: PowerShell type names, native type tags, and the converter
//! table that bridges them.
//!
//! Both tables are immutable and built once on first use.

use crate::converters;
use crate::error::{PsLiteralError, Result};
use crate::types::NativeType;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// A converter from one value representation to the other.
pub type Converter = fn(&Value) -> Value;

/// PowerShell runtime types that can appear on a script parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PsType {
    String,
    Char,
    Guid,
    Uri,
    Version,
    Byte,
    SByte,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Single,
    Double,
    Decimal,
    Boolean,
    SwitchParameter,
    DateTime,
    Array,
    Hashtable,
    PSCustomObject,
    Object,
    ScriptBlock,
    PSCredential,
    SecureString,
    Xml,
}

/// Every PowerShell type with its full dotted name and native type.
const PS_TYPES: [(PsType, &str, NativeType); 27] = [
    (PsType::String, "System.String", NativeType::String),
    (PsType::Char, "System.Char", NativeType::String),
    (PsType::Guid, "System.Guid", NativeType::String),
    (PsType::Uri, "System.Uri", NativeType::String),
    (PsType::Version, "System.Version", NativeType::String),
    (PsType::Byte, "System.Byte", NativeType::Number),
    (PsType::SByte, "System.SByte", NativeType::Number),
    (PsType::Int16, "System.Int16", NativeType::Number),
    (PsType::UInt16, "System.UInt16", NativeType::Number),
    (PsType::Int32, "System.Int32", NativeType::Number),
    (PsType::UInt32, "System.UInt32", NativeType::Number),
    (PsType::Int64, "System.Int64", NativeType::Number),
    (PsType::UInt64, "System.UInt64", NativeType::Number),
    (PsType::Single, "System.Single", NativeType::Number),
    (PsType::Double, "System.Double", NativeType::Number),
    (PsType::Decimal, "System.Decimal", NativeType::Number),
    (PsType::Boolean, "System.Boolean", NativeType::Boolean),
    (
        PsType::SwitchParameter,
        "System.Management.Automation.SwitchParameter",
        NativeType::Boolean,
    ),
    (PsType::DateTime, "System.DateTime", NativeType::Date),
    (PsType::Array, "System.Array", NativeType::Array),
    (PsType::Hashtable, "System.Collections.Hashtable", NativeType::Object),
    (
        PsType::PSCustomObject,
        "System.Management.Automation.PSCustomObject",
        NativeType::Object,
    ),
    (PsType::Object, "System.Object", NativeType::Object),
    (
        PsType::ScriptBlock,
        "System.Management.Automation.ScriptBlock",
        NativeType::Object,
    ),
    (
        PsType::PSCredential,
        "System.Management.Automation.PSCredential",
        NativeType::Object,
    ),
    (PsType::SecureString, "System.Security.SecureString", NativeType::Object),
    (PsType::Xml, "System.Xml.XmlDocument", NativeType::Object),
];

/// Lowercased short and full names → type.
static PS_TYPE_NAMES: LazyLock<HashMap<String, PsType>> = LazyLock::new(|| {
    let mut names = HashMap::new();
    for (ps_type, full_name, _) in PS_TYPES {
        names.insert(full_name.to_ascii_lowercase(), ps_type);
        names.insert(ps_type.short_name().to_ascii_lowercase(), ps_type);
    }
    // Common PowerShell accelerators.
    for (alias, ps_type) in [
        ("int", PsType::Int32),
        ("long", PsType::Int64),
        ("float", PsType::Single),
        ("bool", PsType::Boolean),
        ("switch", PsType::SwitchParameter),
        ("xml", PsType::Xml),
    ] {
        names.insert(alias.to_string(), ps_type);
    }
    names
});

impl PsType {
    /// Resolve `Int32`, `System.Int32`, `[int]` and friends, case-insensitively.
    pub fn from_name(name: &str) -> Result<Self> {
        let mut key = name.trim();
        if let Some(inner) = key.strip_prefix('[').and_then(|k| k.strip_suffix(']')) {
            key = inner;
        }
        if key.ends_with("[]") {
            return Ok(PsType::Array);
        }
        PS_TYPE_NAMES
            .get(&key.to_ascii_lowercase())
            .copied()
            .ok_or_else(|| PsLiteralError::lookup(format!("unknown PowerShell type '{}'", name)))
    }

    fn entry(self) -> &'static (PsType, &'static str, NativeType) {
        // PS_TYPES lists every variant, in declaration order.
        &PS_TYPES[self as usize]
    }

    /// Dotted .NET name, e.g. `System.Int32`.
    pub fn full_name(self) -> &'static str {
        self.entry().1
    }

    /// Last segment of the dotted name, e.g. `Int32`.
    pub fn short_name(self) -> &'static str {
        let full = self.full_name();
        full.rsplit('.').next().unwrap_or(full)
    }

    pub fn native_type(self) -> NativeType {
        self.entry().2
    }
}

impl fmt::Display for PsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

impl FromStr for PsType {
    type Err = PsLiteralError;

    fn from_str(s: &str) -> Result<Self> {
        PsType::from_name(s)
    }
}

/// How values of one native type move between host and PowerShell.
#[derive(Debug, Clone, Copy)]
pub struct ConvertibleType {
    pub native_type: NativeType,
    pub to_host: Converter,
    pub to_powershell: Converter,
    /// PowerShell literal meaning "no value" for this type.
    pub empty_literal: &'static str,
    /// Whether a null/empty argument is handed to the converter. When false,
    /// [`to_powershell`](crate::to_powershell) writes `empty_literal` instead.
    pub accepts_empty: bool,
}

static CONVERTIBLE_TYPES: LazyLock<HashMap<NativeType, ConvertibleType>> = LazyLock::new(|| {
    [
        ConvertibleType {
            native_type: NativeType::Object,
            to_host: converters::object_to_host,
            to_powershell: converters::object_to_powershell,
            empty_literal: converters::NULL_LITERAL,
            accepts_empty: true,
        },
        ConvertibleType {
            native_type: NativeType::String,
            to_host: converters::string_to_host,
            to_powershell: converters::string_to_powershell,
            empty_literal: "",
            accepts_empty: true,
        },
        ConvertibleType {
            native_type: NativeType::Number,
            to_host: converters::number_to_host,
            to_powershell: converters::number_to_powershell,
            empty_literal: converters::ZERO_LITERAL,
            accepts_empty: false,
        },
        ConvertibleType {
            native_type: NativeType::Boolean,
            to_host: converters::boolean_to_host,
            to_powershell: converters::boolean_to_powershell,
            empty_literal: converters::FALSE_LITERAL,
            accepts_empty: false,
        },
        ConvertibleType {
            native_type: NativeType::Date,
            to_host: converters::date_to_host,
            to_powershell: converters::date_to_powershell,
            empty_literal: converters::NULL_LITERAL,
            accepts_empty: true,
        },
        ConvertibleType {
            native_type: NativeType::Array,
            to_host: converters::array_to_host,
            to_powershell: converters::array_to_powershell,
            empty_literal: converters::EMPTY_ARRAY_LITERAL,
            accepts_empty: true,
        },
    ]
    .into_iter()
    .map(|entry| (entry.native_type, entry))
    .collect()
});

/// Look up the converter pair for a native type.
pub fn convertible_type(native_type: NativeType) -> Result<&'static ConvertibleType> {
    CONVERTIBLE_TYPES.get(&native_type).ok_or_else(|| {
        PsLiteralError::lookup(format!("no converter registered for native type '{}'", native_type))
    })
}

/// Look up the converter pair for a PowerShell type name.
pub fn convertible_ps_type(name: &str) -> Result<&'static ConvertibleType> {
    convertible_type(PsType::from_name(name)?.native_type())
}
