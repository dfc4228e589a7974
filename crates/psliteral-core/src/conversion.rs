//! Value conversion facade: applies the registered converter for a value's
//! native type, replacing `value` in place.

use crate::error::Result;
use crate::registry::convertible_type;
use crate::types::ParameterValue;
use serde_json::Value;

/// Convert `pv.value` from PowerShell literal text to a host value.
pub fn to_host(pv: &mut ParameterValue) -> Result<()> {
    let entry = convertible_type(pv.native_type)?;
    pv.value = (entry.to_host)(&pv.value);
    tracing::trace!(name = %pv.name, native_type = %pv.native_type, "converted to host");
    Ok(())
}

/// Convert `pv.value` from a host value to PowerShell literal text.
///
/// A missing value of a type that does not accept one becomes that type's
/// empty literal without reaching the converter.
pub fn to_powershell(pv: &mut ParameterValue) -> Result<()> {
    let entry = convertible_type(pv.native_type)?;
    pv.value = if !entry.accepts_empty && is_missing(&pv.value) {
        Value::String(entry.empty_literal.to_string())
    } else {
        (entry.to_powershell)(&pv.value)
    };
    tracing::trace!(name = %pv.name, native_type = %pv.native_type, "converted to PowerShell");
    Ok(())
}

/// [`to_host`] over a whole list, stopping at the first failure.
pub fn to_host_all(values: &mut [ParameterValue]) -> Result<()> {
    values.iter_mut().try_for_each(to_host)
}

/// [`to_powershell`] over a whole list, stopping at the first failure.
pub fn to_powershell_all(values: &mut [ParameterValue]) -> Result<()> {
    values.iter_mut().try_for_each(to_powershell)
}

/// `null` or blank text.
fn is_missing(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}
