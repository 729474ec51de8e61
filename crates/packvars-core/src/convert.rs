//! Conversion of typed variable values into generic values
//!
//! Generic values are `serde_json::Value`s, which is what the template
//! renderer consumes. Conversion is per variable: a failure is recorded as a
//! diagnostic and only that variable is left out of the result.

use packvars_sdk::{Diagnostic, Diagnostics, VariableValue};
use serde_json::{Map, Number, Value};

use crate::error::ConversionError;
use crate::parsed::PackVariables;

/// Variable name to generic value.
pub type ValueMap = Map<String, Value>;

/// Convert one typed value into a generic value.
pub fn convert_value(value: &VariableValue) -> Result<Value, ConversionError> {
    match value {
        VariableValue::Null => Ok(Value::Null),
        VariableValue::Unknown => Err(ConversionError::Unknown),
        VariableValue::Bool(b) => Ok(Value::Bool(*b)),
        VariableValue::Integer(i) => Ok(Value::Number(Number::from(*i))),
        VariableValue::Float(f) => Number::from_f64(*f)
            .map(Value::Number)
            .ok_or(ConversionError::NonFiniteNumber(*f)),
        VariableValue::String(s) => Ok(Value::String(s.clone())),
        VariableValue::List(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| convert_value(item).map_err(|e| e.within(format!("[{}]", i))))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        VariableValue::Map(entries) => entries
            .iter()
            .map(|(k, v)| {
                convert_value(v)
                    .map(|v| (k.clone(), v))
                    .map_err(|e| e.within(format!(".{}", k)))
            })
            .collect::<Result<Map<_, _>, _>>()
            .map(Value::Object),
    }
}

/// Convert every variable of one pack.
///
/// Never stops early. Each failing variable contributes one error
/// diagnostic pointing at its declaration and is omitted from the map.
/// Diagnostics are ordered by variable name.
pub fn convert_variables(vars: &PackVariables) -> (ValueMap, Diagnostics) {
    let mut out = ValueMap::new();
    let mut diags = Diagnostics::new();

    let mut names: Vec<_> = vars.keys().collect();
    names.sort();

    for name in names {
        let var = &vars[name];
        match convert_value(&var.value) {
            Ok(value) => {
                out.insert(name.to_string(), value);
            }
            Err(e) => {
                diags.push(
                    Diagnostic::error(
                        "Failed to convert variable value",
                        format!("variable '{}': {}", name, e),
                    )
                    .with_subject(var.decl_range.clone()),
                );
            }
        }
    }

    (out, diags)
}
