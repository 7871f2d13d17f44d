//! Data layer: filter compilation and attribute registry

pub mod filters;
pub mod registry;

pub use filters::{FilterCondition, FilterError, Predicate, ResolvedCondition};
pub use registry::{AttributeRegistry, KubernetesAttributes, RegistryError};
