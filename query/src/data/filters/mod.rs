//! Log filter compilation
//!
//! Compiles one structured filter condition into a ClickHouse predicate
//! fragment against the logs table, where most attributes are stored in
//! sparse parallel-array families rather than typed columns.
//!
//! ## Usage
//!
//! ```
//! use loghouse_query::data::filters::{FilterCondition, compile, resolve};
//! use loghouse_query::data::registry::KubernetesAttributes;
//!
//! let condition = FilterCondition {
//!     custom_key: Some("duration".to_string()),
//!     e_op: Some(">".to_string()),
//!     num_value: Some(5.0),
//!     ..Default::default()
//! };
//! let sql = compile(&resolve(&condition), KubernetesAttributes::defaults()).unwrap();
//! assert_eq!(
//!     sql,
//!     "has(number_fields.names, 'duration') AND \
//!      number_fields.values[indexOf(number_fields.names, 'duration')] > 5"
//! );
//! ```

mod columns;
mod compiler;
mod error;
mod params;
mod parser;
mod resolver;
mod types;

pub use columns::{NULL_FIELDS_NAMES, PHONE_COLUMN, SparseFamily};
pub use compiler::{Predicate, compile, compile_condition, compile_parameterized, compile_with};
pub use error::FilterError;
pub use params::{LiteralMode, QueryParam, SqlParams, bind_params};
pub use parser::parse_conditions;
pub use resolver::{ConditionKey, KeyKind, ResolvedCondition, resolve};
pub use types::{FilterCondition, FilterValue, NumericLiteral, Operator, OperatorCategory};
