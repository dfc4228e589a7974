//! Error types for literal parsing and value conversion.

use thiserror::Error;

/// Errors that can occur while parsing, serializing, or converting values.
#[derive(Error, Debug)]
pub enum PsLiteralError {
    /// The literal text is structurally invalid: a punctuator nesting violation,
    /// an unparseable key name, or an unsupported `[Type]` prefix.
    #[error("Parsing error: {0}")]
    StructuralParse(String),

    /// A PowerShell type name or native type tag is not in the registry.
    #[error("Type lookup error: {0}")]
    TypeLookup(String),

    /// The punctuator pattern failed to compile.
    #[error("Lexer pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// A JSON payload handed to one of the JSON entry points was malformed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PsLiteralError {
    pub(crate) fn parse(message: impl Into<String>) -> Self {
        Self::StructuralParse(message.into())
    }

    pub(crate) fn lookup(message: impl Into<String>) -> Self {
        Self::TypeLookup(message.into())
    }
}

/// Convenience alias used throughout psliteral-core.
pub type Result<T> = std::result::Result<T, PsLiteralError>;
