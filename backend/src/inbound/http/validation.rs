//! Translation of loosely typed JSON request fields into domain inputs.
//!
//! Clients of the roster API send ages as numbers or as numeric strings, so
//! the payload keeps `age` as a raw JSON value and this module decides which
//! shape it has. Interpreting the shape is left to the domain.

use serde_json::Value;

use crate::domain::AgeInput;

/// Classify a raw `age` field.
///
/// Absent and `null` both count as missing.
pub(crate) fn age_input(raw: Option<Value>) -> Option<AgeInput> {
    match raw? {
        Value::Null => None,
        Value::Number(number) => Some(match number.as_i64() {
            Some(whole) => AgeInput::Integer(whole),
            None => number
                .as_f64()
                .map_or(AgeInput::Unsupported, AgeInput::Fractional),
        }),
        Value::String(text) => Some(AgeInput::Text(text)),
        // Booleans are refused rather than read as 0 or 1.
        Value::Bool(_) | Value::Array(_) | Value::Object(_) => Some(AgeInput::Unsupported),
    }
}
