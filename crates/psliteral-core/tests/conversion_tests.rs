use psliteral_core::converters::parse_number;
use psliteral_core::registry::convertible_ps_type;
use psliteral_core::{
    convertible_type, to_host, to_host_all, to_powershell, to_powershell_all, NativeType,
    ParameterValue, PsLiteralError, PsType,
};
use serde_json::{json, Number, Value};

/// Helper: run a single value through `to_host`.
fn host(value: impl Into<Value>, native_type: NativeType) -> Value {
    let mut pv = ParameterValue::new("p", value, native_type);
    to_host(&mut pv).expect("to_host failed");
    pv.value
}

/// Helper: run a single value through `to_powershell`.
fn powershell(value: impl Into<Value>, native_type: NativeType) -> Value {
    let mut pv = ParameterValue::new("p", value, native_type);
    to_powershell(&mut pv).expect("to_powershell failed");
    pv.value
}

// ============================================================================
// Array
// ============================================================================

#[test]
fn array_to_host_numbers() {
    assert_eq!(host("@(1,2,3,4)", NativeType::Array), json!([1, 2, 3, 4]));
}

#[test]
fn array_to_host_mixed_elements() {
    assert_eq!(
        host(r#"@('a', 2.5, "c", -3)"#, NativeType::Array),
        json!(["a", 2.5, "c", -3])
    );
}

#[test]
fn array_to_host_keeps_nested_commas() {
    assert_eq!(
        host("@('a,b', @(1,2))", NativeType::Array),
        json!(["a,b", "@(1,2)"])
    );
}

#[test]
fn array_to_host_empty_forms() {
    for text in ["$null", "", "@()", "  @()  "] {
        assert_eq!(host(text, NativeType::Array), json!([]), "input: {text:?}");
    }
    assert_eq!(host(Value::Null, NativeType::Array), json!([]));
}

#[test]
fn array_to_host_without_wrapper() {
    assert_eq!(host("1, 'two'", NativeType::Array), json!([1, "two"]));
}

#[test]
fn array_to_powershell_strings() {
    assert_eq!(
        powershell(json!(["My", "Funny", "Valentine"]), NativeType::Array),
        json!(r#"@("My","Funny","Valentine")"#)
    );
}

#[test]
fn array_to_powershell_numbers_unquoted() {
    assert_eq!(
        powershell(json!([1, 2.5, "7", "x"]), NativeType::Array),
        json!(r#"@(1,2.5,7,"x")"#)
    );
}

#[test]
fn array_to_powershell_empty_and_scalar() {
    assert_eq!(powershell(json!([]), NativeType::Array), json!("@()"));
    assert_eq!(powershell(Value::Null, NativeType::Array), json!("@()"));
    assert_eq!(powershell("solo", NativeType::Array), json!(r#"@("solo")"#));
}

// ============================================================================
// Boolean
// ============================================================================

#[test]
fn boolean_roundtrip_is_idempotent() {
    for b in [true, false] {
        let mut pv = ParameterValue::new("Flag", b, NativeType::Boolean);
        to_powershell(&mut pv).unwrap();
        to_host(&mut pv).unwrap();
        assert_eq!(pv.value, json!(b));
    }
}

#[test]
fn boolean_to_host_only_exact_true_literal() {
    assert_eq!(host("$true", NativeType::Boolean), json!(true));
    assert_eq!(host("$false", NativeType::Boolean), json!(false));
    assert_eq!(host("$TRUE", NativeType::Boolean), json!(false));
    assert_eq!(host("yes", NativeType::Boolean), json!(false));
    assert_eq!(host(true, NativeType::Boolean), json!(true));
}

#[test]
fn boolean_to_powershell_from_strings() {
    assert_eq!(powershell("TRUE", NativeType::Boolean), json!("$true"));
    assert_eq!(powershell("true", NativeType::Boolean), json!("$true"));
    assert_eq!(powershell("yes", NativeType::Boolean), json!("$false"));
    assert_eq!(powershell(Value::Null, NativeType::Boolean), json!("$false"));
}

// ============================================================================
// Object
// ============================================================================

#[test]
fn object_to_host_null_forms_become_empty() {
    assert_eq!(host("$null", NativeType::Object), json!(""));
    assert_eq!(host("", NativeType::Object), json!(""));
    assert_eq!(host(Value::Null, NativeType::Object), json!(""));
}

#[test]
fn object_to_host_passes_text_through() {
    assert_eq!(host("$env:TEMP", NativeType::Object), json!("$env:TEMP"));
}

#[test]
fn object_to_powershell() {
    assert_eq!(powershell("", NativeType::Object), json!("$null"));
    assert_eq!(powershell(Value::Null, NativeType::Object), json!("$null"));
    assert_eq!(powershell(5, NativeType::Object), json!("5"));
    assert_eq!(powershell("Get-Date", NativeType::Object), json!("Get-Date"));
}

// ============================================================================
// String
// ============================================================================

#[test]
fn string_to_host_unescapes_backtick_quotes() {
    assert_eq!(
        host("He said `\"hi`\"", NativeType::String),
        json!("He said \"hi\"")
    );
}

#[test]
fn string_to_powershell_escapes_quotes() {
    assert_eq!(
        powershell("He said \"hi\"", NativeType::String),
        json!("He said `\"hi`\"")
    );
}

#[test]
fn string_roundtrip_through_converters() {
    let mut pv = ParameterValue::new("s", "a \"b\" c", NativeType::String);
    to_powershell(&mut pv).unwrap();
    to_host(&mut pv).unwrap();
    assert_eq!(pv.value, json!("a \"b\" c"));
}

// ============================================================================
// Number
// ============================================================================

#[test]
fn number_to_powershell() {
    assert_eq!(powershell("  42 ", NativeType::Number), json!("42"));
    assert_eq!(powershell("0x10", NativeType::Number), json!("16"));
    assert_eq!(powershell(json!(3.50), NativeType::Number), json!("3.5"));
    assert_eq!(powershell("-7", NativeType::Number), json!("-7"));
}

#[test]
fn number_to_powershell_falls_back_to_zero() {
    assert_eq!(powershell("abc", NativeType::Number), json!("0"));
    assert_eq!(powershell("", NativeType::Number), json!("0"));
    assert_eq!(powershell(Value::Null, NativeType::Number), json!("0"));
}

#[test]
fn number_to_host() {
    assert_eq!(host("42", NativeType::Number), json!(42));
    assert_eq!(host("-1.5", NativeType::Number), json!(-1.5));
    assert_eq!(host("0x34b6d6", NativeType::Number), json!(3454678));
    assert_eq!(host("abc", NativeType::Number), Value::Null);
    assert_eq!(host("", NativeType::Number), Value::Null);
}

#[test]
fn number_hex_rejects_inner_sign() {
    assert_eq!(parse_number("-0x-8000000000000000"), None);
    assert_eq!(parse_number("0x+10"), None);
    assert_eq!(parse_number("0x"), None);
    assert_eq!(host("-0x-8000000000000000", NativeType::Number), Value::Null);
    assert_eq!(powershell("-0x-8000000000000000", NativeType::Number), json!("0"));
}

#[test]
fn number_hex_negative_bounds() {
    assert_eq!(parse_number("-0x10"), Some(Number::from(-16)));
    assert_eq!(parse_number("-0x7fffffffffffffff"), Some(Number::from(-i64::MAX)));
    assert_eq!(parse_number("-0x8000000000000000"), None);
}

// ============================================================================
// Date
// ============================================================================

#[test]
fn date_to_powershell_is_iso() {
    assert_eq!(
        powershell("01/15/2024 10:30:00", NativeType::Date),
        json!("2024-01-15T10:30:00.000Z")
    );
    assert_eq!(
        powershell("2024-01-15T12:30:00+02:00", NativeType::Date),
        json!("2024-01-15T10:30:00.000Z")
    );
}

#[test]
fn date_to_host_uses_display_pattern() {
    assert_eq!(
        host("2024-01-15T10:30:00.000Z", NativeType::Date),
        json!("01/15/2024 10:30:00")
    );
    assert_eq!(host("'2024-01-15'", NativeType::Date), json!("01/15/2024 00:00:00"));
}

#[test]
fn date_invalid_yields_empty() {
    assert_eq!(powershell("not a date", NativeType::Date), json!("$null"));
    assert_eq!(powershell("13/45/2024 00:00:00", NativeType::Date), json!("$null"));
    assert_eq!(host("not a date", NativeType::Date), Value::Null);
    assert_eq!(host(Value::Null, NativeType::Date), Value::Null);
}

#[test]
fn date_roundtrip_through_converters() {
    let mut pv = ParameterValue::new("When", "07/04/2025 18:00:00", NativeType::Date);
    to_powershell(&mut pv).unwrap();
    to_host(&mut pv).unwrap();
    assert_eq!(pv.value, json!("07/04/2025 18:00:00"));
}

// ============================================================================
// Registry and facade
// ============================================================================

#[test]
fn every_native_type_has_a_converter() {
    for native_type in NativeType::ALL {
        let entry = convertible_type(native_type).unwrap();
        assert_eq!(entry.native_type, native_type);
    }
}

#[test]
fn empty_literals() {
    assert_eq!(convertible_type(NativeType::Array).unwrap().empty_literal, "@()");
    assert_eq!(convertible_type(NativeType::Object).unwrap().empty_literal, "$null");
    assert_eq!(convertible_type(NativeType::Number).unwrap().empty_literal, "0");
    assert!(!convertible_type(NativeType::Boolean).unwrap().accepts_empty);
}

#[test]
fn missing_values_without_empty_support_get_empty_literal() {
    for native_type in NativeType::ALL {
        let entry = convertible_type(native_type).unwrap();
        if entry.accepts_empty {
            continue;
        }
        for missing in [Value::Null, json!(""), json!("   ")] {
            assert_eq!(
                powershell(missing.clone(), native_type),
                json!(entry.empty_literal),
                "{native_type} with {missing}"
            );
        }
    }
}

#[test]
fn ps_type_names_resolve() {
    assert_eq!(PsType::from_name("Int32").unwrap(), PsType::Int32);
    assert_eq!(PsType::from_name("System.Int64").unwrap(), PsType::Int64);
    assert_eq!(PsType::from_name("[int]").unwrap(), PsType::Int32);
    assert_eq!(PsType::from_name("pscustomobject").unwrap(), PsType::PSCustomObject);
    assert_eq!(PsType::from_name("String[]").unwrap(), PsType::Array);
    assert_eq!(PsType::from_name("switch").unwrap(), PsType::SwitchParameter);
}

#[test]
fn ps_types_map_onto_native_types() {
    for (ps_type, native_type) in [
        (PsType::Byte, NativeType::Number),
        (PsType::Decimal, NativeType::Number),
        (PsType::Double, NativeType::Number),
        (PsType::Boolean, NativeType::Boolean),
        (PsType::DateTime, NativeType::Date),
        (PsType::Guid, NativeType::String),
        (PsType::Hashtable, NativeType::Object),
        (PsType::Array, NativeType::Array),
    ] {
        assert_eq!(ps_type.native_type(), native_type, "{ps_type}");
    }
    assert_eq!(PsType::Int32.full_name(), "System.Int32");
    assert_eq!(PsType::PSCredential.short_name(), "PSCredential");
}

#[test]
fn unknown_ps_type_is_a_lookup_error() {
    let err = PsType::from_name("NotAType").unwrap_err();
    assert!(matches!(err, PsLiteralError::TypeLookup(_)));
    assert!(err.to_string().contains("NotAType"));
    assert!(convertible_ps_type("NotAType").is_err());
}

#[test]
fn unknown_native_type_is_a_lookup_error() {
    let err = "Nope".parse::<NativeType>().unwrap_err();
    assert!(matches!(err, PsLiteralError::TypeLookup(_)));
    assert_eq!("boolean".parse::<NativeType>().unwrap(), NativeType::Boolean);
}

#[test]
fn convertible_ps_type_uses_native_mapping() {
    let entry = convertible_ps_type("System.Decimal").unwrap();
    assert_eq!(entry.native_type, NativeType::Number);
}

#[test]
fn convert_whole_list() {
    let mut values = vec![
        ParameterValue::new("Count", "3", NativeType::Number),
        ParameterValue::new("Force", "$true", NativeType::Boolean),
        ParameterValue::new("Tags", "@('a','b')", NativeType::Array),
    ];
    to_host_all(&mut values).unwrap();
    assert_eq!(values[0].value, json!(3));
    assert_eq!(values[1].value, json!(true));
    assert_eq!(values[2].value, json!(["a", "b"]));

    to_powershell_all(&mut values).unwrap();
    assert_eq!(values[0].value, json!("3"));
    assert_eq!(values[1].value, json!("$true"));
    assert_eq!(values[2].value, json!(r#"@("a","b")"#));
}

#[test]
fn conversion_leaves_other_fields_alone() {
    let mut pv = ParameterValue::new("Count", "3", NativeType::Number).runtime();
    to_host(&mut pv).unwrap();
    assert_eq!(pv.name, "Count");
    assert_eq!(pv.native_type, NativeType::Number);
    assert!(pv.is_runtime_parameter);
}
