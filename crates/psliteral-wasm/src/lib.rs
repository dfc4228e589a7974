//! WASM bindings for psliteral-core.
//!
//! Lets a JavaScript host parse and build PowerShell literals without a
//! round trip to a PowerShell process. Values cross the boundary as JSON
//! strings shaped like `ParameterValue` (`name`, `value`, `nativeType`,
//! `isRuntimeParameter`).
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p psliteral-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir pkg/ \
//!   target/wasm32-unknown-unknown/release/psliteral_wasm.wasm
//! ```

use psliteral_core::json;
use psliteral_core::{Direction, LiteralType, Parser};
use wasm_bindgen::prelude::*;

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Parse a literal; returns `{"type": ..., "values": [...]}` as JSON.
#[wasm_bindgen(js_name = fromString)]
pub fn from_string(text: &str) -> Result<String, JsValue> {
    let parser = Parser::new().map_err(js_error)?;
    json::parse_to_json(&parser, text, false).map_err(js_error)
}

/// Serialize a JSON value list into literal code. `literal_type` is optional
/// (`hashtable`, `pscustomobject`, `object`).
#[wasm_bindgen(js_name = fromValues)]
pub fn from_values(values_json: &str, literal_type: Option<String>) -> Result<String, JsValue> {
    let literal_type = literal_type
        .as_deref()
        .map(str::parse::<LiteralType>)
        .transpose()
        .map_err(js_error)?;
    json::serialize_json(values_json, literal_type).map_err(js_error)
}

/// Convert every value of a JSON list from PowerShell text to host values.
#[wasm_bindgen(js_name = toHost)]
pub fn to_host(values_json: &str) -> Result<String, JsValue> {
    json::convert_json(values_json, Direction::Host, false).map_err(js_error)
}

/// Convert every value of a JSON list from host values to PowerShell text.
#[wasm_bindgen(js_name = toPowerShell)]
pub fn to_powershell(values_json: &str) -> Result<String, JsValue> {
    json::convert_json(values_json, Direction::PowerShell, false).map_err(js_error)
}
