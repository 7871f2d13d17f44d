//! Predicate compiler
//!
//! Turns a [`ResolvedCondition`] into a boolean ClickHouse expression meant
//! for embedding in a larger `WHERE` clause. The compiler picks one of five
//! templates by operator category and renders it against the storage shape
//! of the key: a sparse family scan (any key), a guarded sparse lookup
//! (label or custom key), or a first-class column (kubernetes attribute or
//! `phone`).

use serde::Serialize;

use super::columns::{NULL_FIELDS_NAMES, PHONE_COLUMN, SCAN_VARIABLE, SparseFamily};
use super::error::FilterError;
use super::params::{LiteralMode, QueryParam, SqlParams, bind_params};
use super::resolver::{ConditionKey, ResolvedCondition, resolve};
use super::types::{FilterCondition, FilterValue, NumericLiteral, Operator, OperatorCategory};
use crate::data::registry::AttributeRegistry;
use crate::utils::sql::{has_like_wildcard, strip_regex_delimiters};

/// Compiled predicate with its bind values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Predicate {
    pub sql: String,
    pub params: Vec<QueryParam>,
}

impl Predicate {
    /// Bind this predicate's values onto a query whose SQL embeds `self.sql`.
    pub fn bind_to(&self, query: clickhouse::query::Query) -> clickhouse::query::Query {
        bind_params(&self.params, query)
    }
}

/// Compile with every literal inlined and escaped.
pub fn compile(
    resolved: &ResolvedCondition,
    registry: &dyn AttributeRegistry,
) -> Result<String, FilterError> {
    let mut params = SqlParams::new(LiteralMode::Inline);
    compile_with(resolved, registry, &mut params)
}

/// Compile with every literal replaced by a `?` placeholder.
pub fn compile_parameterized(
    resolved: &ResolvedCondition,
    registry: &dyn AttributeRegistry,
) -> Result<Predicate, FilterError> {
    let mut params = SqlParams::new(LiteralMode::Bound);
    let sql = compile_with(resolved, registry, &mut params)?;
    Ok(Predicate {
        sql,
        params: params.values,
    })
}

/// Resolve and compile a raw condition in one step.
pub fn compile_condition(
    condition: &FilterCondition,
    registry: &dyn AttributeRegistry,
) -> Result<String, FilterError> {
    compile(&resolve(condition), registry)
}

/// Compile into the given parameter collector.
///
/// Placeholders are appended to `params` in the order they appear in the
/// returned SQL.
pub fn compile_with(
    resolved: &ResolvedCondition,
    registry: &dyn AttributeRegistry,
    params: &mut SqlParams,
) -> Result<String, FilterError> {
    let operator: Operator = resolved
        .operator
        .as_deref()
        .ok_or(FilterError::MissingOperator)?
        .parse()?;
    let target = Target::classify(&resolved.key, registry)?;

    tracing::trace!(
        operator = %operator,
        storage = ?target,
        mode = ?params.mode(),
        "Compiling filter condition"
    );

    match operator.category() {
        OperatorCategory::NullCheck => null_check(operator, &target, params),
        OperatorCategory::BooleanCheck => boolean_check(operator, &target, params),
        OperatorCategory::NumericComparison => {
            let value = required_value(resolved, operator)?;
            numeric_comparison(operator, &target, value, params)
        }
        OperatorCategory::RegexMatch => {
            let value = required_value(resolved, operator)?;
            Ok(regex_match(operator, &target, value, params))
        }
        OperatorCategory::Equality => {
            let value = required_value(resolved, operator)?;
            equality(operator, &target, value, params)
        }
    }
}

/// Storage location a key compiles against
#[derive(Debug)]
enum Target<'a> {
    Any,
    Kubernetes(&'a str),
    Label(&'a str),
    Custom(&'a str),
}

impl<'a> Target<'a> {
    /// Only custom keys consult the registry; labels never map to columns.
    fn classify(
        key: &'a ConditionKey,
        registry: &dyn AttributeRegistry,
    ) -> Result<Self, FilterError> {
        match key {
            ConditionKey::Any => Ok(Self::Any),
            ConditionKey::Label(name) | ConditionKey::Custom(name) if name.is_empty() => {
                Err(FilterError::MissingKey)
            }
            ConditionKey::Label(name) => Ok(Self::Label(name)),
            ConditionKey::Custom(name) if registry.is_kubernetes_attribute(name) => {
                Ok(Self::Kubernetes(name))
            }
            ConditionKey::Custom(name) => Ok(Self::Custom(name)),
        }
    }

    fn name(&self) -> Option<&'a str> {
        match self {
            Self::Any => None,
            Self::Kubernetes(name) | Self::Label(name) | Self::Custom(name) => Some(*name),
        }
    }

    fn is_phone(&self) -> bool {
        self.name() == Some(PHONE_COLUMN)
    }
}

fn required_value(
    resolved: &ResolvedCondition,
    operator: Operator,
) -> Result<&FilterValue, FilterError> {
    resolved
        .value
        .as_ref()
        .ok_or(FilterError::MissingValue { operator })
}

/// `has(F.names, key) AND <predicate over F.values[indexOf(F.names, key)]>`
fn guarded<P>(family: SparseFamily, key: &str, params: &mut SqlParams, predicate: P) -> String
where
    P: FnOnce(&str, &mut SqlParams) -> String,
{
    let guard = family.contains(&params.string(key));
    let element = family.element(&params.string(key));
    format!("{} AND {}", guard, predicate(&element, params))
}

/// Render a string predicate in the address mode of `target`.
fn string_predicate<P>(target: &Target<'_>, params: &mut SqlParams, predicate: P) -> String
where
    P: FnOnce(&str, &mut SqlParams) -> String,
{
    match target {
        Target::Any => SparseFamily::String.any_value(&predicate(SCAN_VARIABLE, params)),
        Target::Kubernetes(column) => predicate(*column, params),
        Target::Label(key) => guarded(SparseFamily::Labels, key, params, predicate),
        Target::Custom(key) => guarded(SparseFamily::String, key, params, predicate),
    }
}

fn null_check(
    operator: Operator,
    target: &Target<'_>,
    params: &mut SqlParams,
) -> Result<String, FilterError> {
    let key = target.name().ok_or(FilterError::MissingKey)?;
    let negation = if operator == Operator::NotNull { "NOT " } else { "" };
    Ok(format!(
        "{}has({}, {})",
        negation,
        NULL_FIELDS_NAMES,
        params.string(key)
    ))
}

fn boolean_check(
    operator: Operator,
    target: &Target<'_>,
    params: &mut SqlParams,
) -> Result<String, FilterError> {
    let key = target.name().ok_or(FilterError::MissingKey)?;
    let flag = if operator == Operator::IsTrue { 1 } else { 0 };
    Ok(guarded(SparseFamily::Boolean, key, params, |element, _| {
        format!("{} = {}", element, flag)
    }))
}

fn numeric_comparison(
    operator: Operator,
    target: &Target<'_>,
    value: &FilterValue,
    params: &mut SqlParams,
) -> Result<String, FilterError> {
    let number = value.as_number()?;

    if target.is_phone() {
        return Ok(format!(
            "{} {} {}",
            PHONE_COLUMN,
            operator,
            params.number(number)
        ));
    }

    Ok(match target {
        Target::Any => SparseFamily::Number.any_value(&format!(
            "{} {} {}",
            SCAN_VARIABLE,
            operator,
            params.number(number)
        )),
        Target::Kubernetes(key) | Target::Label(key) | Target::Custom(key) => {
            guarded(SparseFamily::Number, key, params, |element, params| {
                format!("{} {} {}", element, operator, params.number(number))
            })
        }
    })
}

fn regex_match(
    operator: Operator,
    target: &Target<'_>,
    value: &FilterValue,
    params: &mut SqlParams,
) -> String {
    let pattern = strip_regex_delimiters(&value.to_string());
    let expr = string_predicate(target, params, |subject, params| {
        format!("match({}, {})", subject, params.string(&pattern))
    });

    if operator == Operator::NotMatch {
        format!("not({})", expr)
    } else {
        expr
    }
}

fn equality(
    operator: Operator,
    target: &Target<'_>,
    value: &FilterValue,
    params: &mut SqlParams,
) -> Result<String, FilterError> {
    if target.is_phone() {
        return numeric_comparison(operator, target, value, params);
    }

    let number = match (value, target) {
        (FilterValue::Number(n), Target::Any | Target::Kubernetes(_) | Target::Custom(_)) => {
            NumericLiteral::Float(*n)
        }
        _ => return Ok(string_equality(operator, target, &value.to_string(), params)),
    };
    let text = value.to_string();

    Ok(match target {
        Target::Any => {
            let as_string = SparseFamily::String.any_value(&format!(
                "{} {} {}",
                SCAN_VARIABLE,
                operator,
                params.string(&text)
            ));
            let as_number = SparseFamily::Number.any_value(&format!(
                "{} {} {}",
                SCAN_VARIABLE,
                operator,
                params.number(number)
            ));
            format!("{} OR {}", as_string, as_number)
        }
        Target::Kubernetes(column) => format!("{} {} {}", column, operator, params.string(&text)),
        Target::Custom(key) => typed_lookup(operator, key, &text, number, params),
        // Unreachable: labels are string-valued and returned above
        Target::Label(_) => string_equality(operator, target, &text, params),
    })
}

/// Equality against a string value. Values containing `%` or `_` switch to
/// `like`/`notLike` pattern matching.
fn string_equality(
    operator: Operator,
    target: &Target<'_>,
    text: &str,
    params: &mut SqlParams,
) -> String {
    if has_like_wildcard(text) {
        let function = if operator == Operator::Eq {
            "like"
        } else {
            "notLike"
        };
        string_predicate(target, params, |subject, params| {
            format!("{}({}, {})", function, subject, params.string(text))
        })
    } else {
        string_predicate(target, params, |subject, params| {
            format!("{} {} {}", subject, operator, params.string(text))
        })
    }
}

/// A custom key may be stored as a string or a number; which family holds it
/// is only known per row, so the choice is deferred to the query engine.
fn typed_lookup(
    operator: Operator,
    key: &str,
    text: &str,
    number: NumericLiteral,
    params: &mut SqlParams,
) -> String {
    let string_guard = SparseFamily::String.contains(&params.string(key));
    let string_element = SparseFamily::String.element(&params.string(key));
    let string_value = params.string(text);
    let number_guard = SparseFamily::Number.contains(&params.string(key));
    let number_element = SparseFamily::Number.element(&params.string(key));
    let number_value = params.number(number);

    format!(
        "CASE WHEN {} THEN {} {} {} WHEN {} THEN {} {} {} ELSE 0 END",
        string_guard,
        string_element,
        operator,
        string_value,
        number_guard,
        number_element,
        operator,
        number_value
    )
}
