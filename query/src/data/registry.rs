//! Kubernetes attribute registry
//!
//! Attributes registered here have their own first-class column in the logs
//! table and are addressed directly instead of through a sparse family.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use thiserror::Error;

use crate::utils::sql::is_plain_identifier;

/// First-class kubernetes columns of the logs table
pub const DEFAULT_KUBERNETES_ATTRIBUTES: &[&str] =
    &["namespace", "host", "pod_name", "container_name", "stream"];

static DEFAULT_REGISTRY: LazyLock<KubernetesAttributes> = LazyLock::new(|| KubernetesAttributes {
    names: DEFAULT_KUBERNETES_ATTRIBUTES
        .iter()
        .map(|name| name.to_string())
        .collect(),
});

/// Read-only lookup consulted by the compiler to classify custom keys.
///
/// Implementations must be safe for unsynchronized concurrent reads.
pub trait AttributeRegistry: Send + Sync {
    fn is_kubernetes_attribute(&self, name: &str) -> bool;
}

impl<F> AttributeRegistry for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn is_kubernetes_attribute(&self, name: &str) -> bool {
        self(name)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Invalid kubernetes attribute name '{0}': must be a plain column identifier")]
    InvalidName(String),
}

/// Set of attribute names that map to kubernetes columns
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KubernetesAttributes {
    names: BTreeSet<String>,
}

impl KubernetesAttributes {
    /// Build a registry from names. Names are emitted unquoted as column
    /// identifiers, so each must be a plain identifier.
    pub fn new<I, S>(names: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut registry = Self::default();
        registry.extend(names)?;
        Ok(registry)
    }

    /// Process-wide registry holding the default kubernetes columns
    pub fn defaults() -> &'static Self {
        &DEFAULT_REGISTRY
    }

    pub fn extend<I, S>(&mut self, names: I) -> Result<(), RegistryError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            let name = name.into();
            if !is_plain_identifier(&name) {
                return Err(RegistryError::InvalidName(name));
            }
            self.names.insert(name);
        }
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl AttributeRegistry for KubernetesAttributes {
    fn is_kubernetes_attribute(&self, name: &str) -> bool {
        self.names.contains(name)
    }
}
