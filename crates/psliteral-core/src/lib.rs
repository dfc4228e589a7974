//! # psliteral-core
//!
//! Pure-Rust translator between PowerShell literal objects
//! (`@{ Name = "value"; Count = 3 }`, optionally cast with `[PSCustomObject]`)
//! and an ordered list of typed [`ParameterValue`]s, plus the conversion layer
//! that maps each value between host form and PowerShell literal text.
//!
//! ## Quick start
//!
//! ```rust
//! use psliteral_core::{from_string, from_values, to_host, NativeType};
//!
//! // PowerShell → values
//! let parsed = from_string("@{ Name = 'svc01'; Retries = 3; Force = $true }").unwrap();
//! assert_eq!(parsed.values.len(), 3);
//! assert_eq!(parsed.values[0].native_type, NativeType::String);
//!
//! // values → PowerShell
//! let code = from_values(&parsed.values, parsed.literal_type).code;
//! assert_eq!(code, r#"@{"Name"="svc01"; "Retries"=3; "Force"=$true}"#);
//!
//! // PowerShell text → host value, in place
//! let mut force = parsed.values[2].clone();
//! to_host(&mut force).unwrap();
//! assert_eq!(force.value, serde_json::json!(true));
//! ```
//!
//! ## Modules
//!
//! - [`lexer`]: punctuator scanner
//! - [`parser`]: literal text → values (`from_string`)
//! - [`serializer`]: values → literal text (`from_values`)
//! - [`registry`]: PowerShell type names and the converter table
//! - [`converters`]: per-type scalar conversions
//! - [`conversion`]: in-place conversion facade (`to_host`, `to_powershell`)
//! - [`json`]: JSON string entry points for the CLI and WASM bindings
//! - [`error`]: error types
//! - [`types`]: shared data model

pub mod conversion;
pub mod converters;
pub mod error;
pub mod json;
pub mod lexer;
pub mod parser;
pub mod registry;
pub mod serializer;
pub mod types;

pub use conversion::{to_host, to_host_all, to_powershell, to_powershell_all};
pub use error::PsLiteralError;
pub use json::Direction;
pub use parser::{from_string, Parser};
pub use registry::{convertible_type, ConvertibleType, PsType};
pub use serializer::from_values;
pub use types::{LiteralType, NativeType, ParameterValue, ParsedLiteral, SerializedLiteral};
