//! Literal rendering for compiled predicates
//!
//! Every user-controlled value goes through [`SqlParams`]. In inline mode it
//! is emitted as an escaped literal; in bound mode it becomes a `?`
//! placeholder and the value is collected for binding. Column and array
//! names are never parameterized.

use serde::Serialize;

use super::types::NumericLiteral;
use crate::utils::sql::quote_string_literal;

/// Value bound to a `?` placeholder
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryParam {
    String(String),
    Int64(i64),
    UInt64(u64),
    Float64(f64),
}

impl From<NumericLiteral> for QueryParam {
    fn from(value: NumericLiteral) -> Self {
        match value {
            NumericLiteral::Int(n) => Self::Int64(n),
            NumericLiteral::UInt(n) => Self::UInt64(n),
            NumericLiteral::Float(n) => Self::Float64(n),
        }
    }
}

/// How literals are written into the SQL text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LiteralMode {
    #[default]
    Inline,
    Bound,
}

/// Collects SQL parameters during predicate building (maintains placeholder order)
#[derive(Debug, Default)]
pub struct SqlParams {
    mode: LiteralMode,
    pub values: Vec<QueryParam>,
}

impl SqlParams {
    pub fn new(mode: LiteralMode) -> Self {
        Self {
            mode,
            values: Vec::new(),
        }
    }

    pub fn mode(&self) -> LiteralMode {
        self.mode
    }

    /// Render a string literal
    pub fn string(&mut self, value: &str) -> String {
        match self.mode {
            LiteralMode::Inline => quote_string_literal(value),
            LiteralMode::Bound => {
                self.values.push(QueryParam::String(value.to_string()));
                "?".to_string()
            }
        }
    }

    /// Render a numeric literal
    pub fn number(&mut self, value: NumericLiteral) -> String {
        match self.mode {
            LiteralMode::Inline => value.to_string(),
            LiteralMode::Bound => {
                self.values.push(value.into());
                "?".to_string()
            }
        }
    }
}

/// Bind parameters onto a ClickHouse query, in placeholder order.
pub fn bind_params(
    params: &[QueryParam],
    mut query: clickhouse::query::Query,
) -> clickhouse::query::Query {
    for param in params {
        query = match param {
            QueryParam::String(s) => query.bind(s),
            QueryParam::Int64(n) => query.bind(n),
            QueryParam::UInt64(n) => query.bind(n),
            QueryParam::Float64(n) => query.bind(n),
        };
    }
    query
}
