//! NamespaceProvider trait: the one seam isolating host namespace reflection.
//! Enables mock injection for testing and keeps the engine host-agnostic.

use crate::error::ConstError;
use crate::path::ConstPath;
use crate::value::Value;

/// Reflection operations the stubbing engine needs from the host namespace.
///
/// Path-taking operations walk *owned* bindings only, one segment at a time
/// from the root scope. Walking through an intermediate segment that exists
/// but is not a container fails with [`ConstError::NotStubbable`]; a missing
/// intermediate simply means the binding is not defined.
pub trait NamespaceProvider {
    /// Whether the binding at `path` is currently defined.
    fn exists(&self, path: &ConstPath) -> Result<bool, ConstError>;

    /// The current value at `path`, or `None` when undefined.
    fn get(&self, path: &ConstPath) -> Result<Option<Value>, ConstError>;

    /// Bind `value` at `path`, creating missing intermediate containers.
    fn set(&mut self, path: &ConstPath, value: Value) -> Result<(), ConstError>;

    /// Remove the owned binding at `path`. Returns the removed value, or
    /// `None` when the binding was not defined.
    fn remove(&mut self, path: &ConstPath) -> Result<Option<Value>, ConstError>;

    /// The bindings declared directly on `container`, never inherited ones.
    fn owned_children(&self, container: &Value) -> Result<Vec<(String, Value)>, ConstError>;

    /// Whether `value` can hold nested bindings.
    fn is_container(&self, value: &Value) -> bool;

    /// Whether `name` resolves on `container` through an ancestor scope (its
    /// supertype chain, or the root scope) without being owned by `container`
    /// itself. Backs the hide collision guard.
    fn resolves_via_ancestors(&self, container: &Value, name: &str) -> bool;
}

impl<T: NamespaceProvider + ?Sized> NamespaceProvider for &mut T {
    fn exists(&self, path: &ConstPath) -> Result<bool, ConstError> {
        (**self).exists(path)
    }

    fn get(&self, path: &ConstPath) -> Result<Option<Value>, ConstError> {
        (**self).get(path)
    }

    fn set(&mut self, path: &ConstPath, value: Value) -> Result<(), ConstError> {
        (**self).set(path, value)
    }

    fn remove(&mut self, path: &ConstPath) -> Result<Option<Value>, ConstError> {
        (**self).remove(path)
    }

    fn owned_children(&self, container: &Value) -> Result<Vec<(String, Value)>, ConstError> {
        (**self).owned_children(container)
    }

    fn is_container(&self, value: &Value) -> bool {
        (**self).is_container(value)
    }

    fn resolves_via_ancestors(&self, container: &Value, name: &str) -> bool {
        (**self).resolves_via_ancestors(container, name)
    }
}
