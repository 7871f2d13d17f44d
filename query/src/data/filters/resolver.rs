//! Condition resolution
//!
//! Reduces a raw [`FilterCondition`] to the key, operator code and value the
//! compiler works with. Resolution never fails: incomplete conditions
//! resolve to empty parts and are rejected at compile time.

use serde::Serialize;

use super::types::{FilterCondition, FilterValue, Operator};

/// Which attribute a condition addresses
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum ConditionKey {
    /// Any attribute of the relevant storage family
    Any,
    /// A user-defined label (always string-valued)
    Label(String),
    /// A custom attribute, possibly a registered kubernetes column.
    /// May be empty when the condition named no key at all.
    Custom(String),
}

/// Key kind without the name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Any,
    Label,
    Custom,
}

impl ConditionKey {
    pub fn kind(&self) -> KeyKind {
        match self {
            Self::Any => KeyKind::Any,
            Self::Label(_) => KeyKind::Label,
            Self::Custom(_) => KeyKind::Custom,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Any => None,
            Self::Label(name) | Self::Custom(name) => Some(name.as_str()),
        }
    }
}

/// Derived view of one condition, consumed by the compiler
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedCondition {
    pub key: ConditionKey,
    /// Synthetic flag code (`not_null`, ...) or the raw `e_op` text
    pub operator: Option<String>,
    pub value: Option<FilterValue>,
}

impl ResolvedCondition {
    pub fn key_kind(&self) -> KeyKind {
        self.key.kind()
    }
}

/// Resolve key, operator and value using the fixed precedence rules.
pub fn resolve(condition: &FilterCondition) -> ResolvedCondition {
    ResolvedCondition {
        key: resolve_key(condition),
        operator: resolve_operator(condition),
        value: resolve_value(condition),
    }
}

/// `any_key` wins, then a non-empty `label_key`, then `custom_key`.
fn resolve_key(condition: &FilterCondition) -> ConditionKey {
    if condition.any_key {
        return ConditionKey::Any;
    }
    match condition.label_key.as_deref() {
        Some(label) if !label.is_empty() => ConditionKey::Label(label.to_string()),
        _ => ConditionKey::Custom(condition.custom_key.clone().unwrap_or_default()),
    }
}

/// First set flag in `not_null > is_null > is_true > is_false`, else `e_op`.
fn resolve_operator(condition: &FilterCondition) -> Option<String> {
    let flags = [
        (condition.not_null, Operator::NotNull),
        (condition.is_null, Operator::IsNull),
        (condition.is_true, Operator::IsTrue),
        (condition.is_false, Operator::IsFalse),
    ];

    flags
        .iter()
        .find(|(set, _)| *set)
        .map(|(_, op)| op.as_str().to_string())
        .or_else(|| condition.e_op.clone().filter(|op| !op.is_empty()))
}

/// A non-empty string value takes precedence over the numeric one.
fn resolve_value(condition: &FilterCondition) -> Option<FilterValue> {
    match condition.str_value.as_deref() {
        Some(s) if !s.is_empty() => Some(FilterValue::String(s.to_string())),
        _ => condition.num_value.map(FilterValue::Number),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_key_wins_over_label_and_custom() {
        let condition = FilterCondition {
            any_key: true,
            label_key: Some("env".to_string()),
            custom_key: Some("duration".to_string()),
            ..Default::default()
        };
        let resolved = resolve(&condition);
        assert_eq!(resolved.key, ConditionKey::Any);
        assert_eq!(resolved.key_kind(), KeyKind::Any);
        assert_eq!(resolved.key.name(), None);
    }

    #[test]
    fn test_label_key_wins_over_custom() {
        let condition = FilterCondition {
            label_key: Some("env".to_string()),
            custom_key: Some("duration".to_string()),
            ..Default::default()
        };
        assert_eq!(
            resolve(&condition).key,
            ConditionKey::Label("env".to_string())
        );
    }

    #[test]
    fn test_empty_label_falls_back_to_custom() {
        let condition = FilterCondition {
            label_key: Some(String::new()),
            custom_key: Some("duration".to_string()),
            ..Default::default()
        };
        assert_eq!(
            resolve(&condition).key,
            ConditionKey::Custom("duration".to_string())
        );
    }

    #[test]
    fn test_no_key_resolves_to_empty_custom() {
        let resolved = resolve(&FilterCondition::default());
        assert_eq!(resolved.key, ConditionKey::Custom(String::new()));
        assert_eq!(resolved.operator, None);
        assert_eq!(resolved.value, None);
    }

    #[test]
    fn test_operator_flag_precedence() {
        let condition = FilterCondition {
            not_null: true,
            is_null: true,
            is_true: true,
            is_false: true,
            e_op: Some("=".to_string()),
            ..Default::default()
        };
        assert_eq!(resolve(&condition).operator.as_deref(), Some("not_null"));

        let condition = FilterCondition {
            is_true: true,
            is_false: true,
            e_op: Some("=".to_string()),
            ..Default::default()
        };
        assert_eq!(resolve(&condition).operator.as_deref(), Some("is_true"));

        let condition = FilterCondition {
            is_false: true,
            e_op: Some(">".to_string()),
            ..Default::default()
        };
        assert_eq!(resolve(&condition).operator.as_deref(), Some("is_false"));
    }

    #[test]
    fn test_operator_falls_through_to_e_op_verbatim() {
        let condition = FilterCondition {
            e_op: Some("~~".to_string()),
            ..Default::default()
        };
        assert_eq!(resolve(&condition).operator.as_deref(), Some("~~"));
    }

    #[test]
    fn test_empty_e_op_is_no_operator() {
        let condition = FilterCondition {
            e_op: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(resolve(&condition).operator, None);
    }

    #[test]
    fn test_string_value_wins_when_non_empty() {
        let condition = FilterCondition {
            str_value: Some("abc".to_string()),
            num_value: Some(5.0),
            ..Default::default()
        };
        assert_eq!(
            resolve(&condition).value,
            Some(FilterValue::String("abc".to_string()))
        );
    }

    #[test]
    fn test_empty_string_value_falls_back_to_number() {
        let condition = FilterCondition {
            str_value: Some(String::new()),
            num_value: Some(5.0),
            ..Default::default()
        };
        assert_eq!(resolve(&condition).value, Some(FilterValue::Number(5.0)));
    }

    #[test]
    fn test_resolved_serialize() {
        let condition = FilterCondition {
            label_key: Some("env".to_string()),
            e_op: Some("=".to_string()),
            str_value: Some("prod".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&resolve(&condition)).unwrap();
        assert_eq!(
            json,
            r#"{"key":{"kind":"label","name":"env"},"operator":"=","value":"prod"}"#
        );
    }
}
