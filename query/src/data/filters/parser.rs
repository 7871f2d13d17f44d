//! Condition parsing
//!
//! Parses JSON filter conditions with size and count limits.

use serde_json::Value;

use super::error::FilterError;
use super::types::FilterCondition;

/// Maximum size of condition JSON in bytes (64KB)
const MAX_CONDITION_JSON_SIZE: usize = 64 * 1024;

/// Maximum number of conditions allowed per payload
const MAX_CONDITIONS: usize = 100;

/// Parse conditions from JSON
///
/// Accepts a single condition object or an array of them.
pub fn parse_conditions(json_str: &str) -> Result<Vec<FilterCondition>, FilterError> {
    if json_str.len() > MAX_CONDITION_JSON_SIZE {
        return Err(FilterError::TooLarge {
            limit: MAX_CONDITION_JSON_SIZE,
        });
    }

    let value: Value =
        serde_json::from_str(json_str).map_err(|e| FilterError::InvalidJson(e.to_string()))?;

    let conditions: Vec<FilterCondition> = match value {
        Value::Array(_) => serde_json::from_value::<Vec<FilterCondition>>(value),
        Value::Object(_) => serde_json::from_value::<FilterCondition>(value).map(|c| vec![c]),
        other => {
            return Err(FilterError::InvalidJson(format!(
                "expected a condition object or an array of conditions, got {}",
                json_type_name(&other)
            )));
        }
    }
    .map_err(|e| FilterError::InvalidJson(e.to_string()))?;

    if conditions.len() > MAX_CONDITIONS {
        return Err(FilterError::TooMany {
            limit: MAX_CONDITIONS,
        });
    }

    tracing::debug!(count = conditions.len(), "Parsed filter conditions");
    Ok(conditions)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
