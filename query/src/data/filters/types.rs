//! Filter type definitions
//!
//! Defines the raw filter condition accepted from upstream parsers and the
//! operator and value types the compiler dispatches on.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::FilterError;

/// One structured log filter condition, as produced by the filter language
/// parser.
///
/// At most one key field and one operator are expected to be set. When more
/// are populated, key precedence is `any_key > label_key > custom_key` and
/// operator precedence is `not_null > is_null > is_true > is_false > e_op`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FilterCondition {
    #[serde(alias = "anyKey")]
    pub any_key: bool,
    #[serde(alias = "labelKey")]
    pub label_key: Option<String>,
    #[serde(alias = "customKey")]
    pub custom_key: Option<String>,
    #[serde(alias = "strValue")]
    pub str_value: Option<String>,
    #[serde(alias = "numValue")]
    pub num_value: Option<f64>,
    #[serde(alias = "notNull")]
    pub not_null: bool,
    #[serde(alias = "isNull")]
    pub is_null: bool,
    #[serde(alias = "isTrue")]
    pub is_true: bool,
    #[serde(alias = "isFalse")]
    pub is_false: bool,
    #[serde(alias = "eOp")]
    pub e_op: Option<String>,
}

/// Literal operand of a condition
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FilterValue {
    String(String),
    Number(f64),
}

impl FilterValue {
    /// Numeric view of the value.
    ///
    /// Strings are trimmed and must parse as an integer or a finite float.
    /// Integers keep their exact value.
    pub fn as_number(&self) -> Result<NumericLiteral, FilterError> {
        match self {
            Self::Number(n) => Ok(NumericLiteral::Float(*n)),
            Self::String(s) => s.parse(),
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "{}", s),
            Self::Number(n) => write!(f, "{}", n),
        }
    }
}

/// Numeric literal emitted into a predicate
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericLiteral {
    Int(i64),
    UInt(u64),
    Float(f64),
}

impl FromStr for NumericLiteral {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if let Ok(n) = text.parse::<i64>() {
            return Ok(Self::Int(n));
        }
        if let Ok(n) = text.parse::<u64>() {
            return Ok(Self::UInt(n));
        }
        match text.parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(Self::Float(n)),
            _ => Err(FilterError::InvalidNumber {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for NumericLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{}", n),
            Self::UInt(n) => write!(f, "{}", n),
            Self::Float(n) => write!(f, "{}", n),
        }
    }
}

/// Filter operators, including the synthetic codes derived from flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Operator {
    #[serde(rename = "not_null")]
    NotNull,
    #[serde(rename = "is_null")]
    IsNull,
    #[serde(rename = "is_true")]
    IsTrue,
    #[serde(rename = "is_false")]
    IsFalse,
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = ">=")]
    Gte,
    #[serde(rename = "<=")]
    Lte,
    #[serde(rename = "=~")]
    Match,
    #[serde(rename = "!~")]
    NotMatch,
}

/// Predicate template family an operator compiles to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorCategory {
    NullCheck,
    BooleanCheck,
    NumericComparison,
    RegexMatch,
    Equality,
}

impl Operator {
    /// Operator code as it appears in conditions and in emitted SQL
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotNull => "not_null",
            Self::IsNull => "is_null",
            Self::IsTrue => "is_true",
            Self::IsFalse => "is_false",
            Self::Eq => "=",
            Self::Ne => "!=",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::Gte => ">=",
            Self::Lte => "<=",
            Self::Match => "=~",
            Self::NotMatch => "!~",
        }
    }

    pub fn category(&self) -> OperatorCategory {
        match self {
            Self::NotNull | Self::IsNull => OperatorCategory::NullCheck,
            Self::IsTrue | Self::IsFalse => OperatorCategory::BooleanCheck,
            Self::Gt | Self::Lt | Self::Gte | Self::Lte => OperatorCategory::NumericComparison,
            Self::Match | Self::NotMatch => OperatorCategory::RegexMatch,
            Self::Eq | Self::Ne => OperatorCategory::Equality,
        }
    }
}

impl FromStr for Operator {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not_null" => Ok(Self::NotNull),
            "is_null" => Ok(Self::IsNull),
            "is_true" => Ok(Self::IsTrue),
            "is_false" => Ok(Self::IsFalse),
            "=" => Ok(Self::Eq),
            "!=" => Ok(Self::Ne),
            ">" => Ok(Self::Gt),
            "<" => Ok(Self::Lt),
            ">=" => Ok(Self::Gte),
            "<=" => Ok(Self::Lte),
            "=~" => Ok(Self::Match),
            "!~" => Ok(Self::NotMatch),
            other => Err(FilterError::UnsupportedOperator(other.to_string())),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
