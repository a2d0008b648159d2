//! Arena-backed container tree.
//!
//! - Slot 0 is the root scope; it always exists.
//! - A container may declare a supertype; bindings reachable only through the
//!   supertype chain are *inherited*, never owned.
//! - Resolution walks owned bindings one segment at a time from the root.
//!   A missing intermediate means "not defined"; an intermediate bound to a
//!   non-container value is a [`ConstError::NotStubbable`].

use std::collections::BTreeMap;

use constable_core::{ConstError, ConstPath, ContainerId, NamespaceProvider, Value};

const ROOT: ContainerId = ContainerId(0);

#[derive(Debug, Default, Clone, PartialEq)]
struct ContainerData {
    bindings: BTreeMap<String, Value>,
    supertype: Option<ContainerId>,
}

/// In-memory hierarchical namespace.
#[derive(Debug, Clone, PartialEq)]
pub struct Namespace {
    containers: Vec<ContainerData>,
}

impl Namespace {
    /// Empty namespace holding only the root scope.
    pub fn new() -> Self {
        Self {
            containers: vec![ContainerData::default()],
        }
    }

    /// The root scope's container handle.
    pub fn root(&self) -> ContainerId {
        ROOT
    }

    /// Allocate a fresh container with no supertype.
    pub fn define_container(&mut self) -> ContainerId {
        self.alloc(None)
    }

    /// Allocate a fresh container inheriting from `supertype`.
    pub fn define_subtype(&mut self, supertype: ContainerId) -> ContainerId {
        self.alloc(Some(supertype))
    }

    pub fn supertype(&self, id: ContainerId) -> Option<ContainerId> {
        self.container(id).and_then(|data| data.supertype)
    }

    /// Bind `name` directly on `container`. Namespace authoring for fixtures
    /// and test setup; stubbing goes through the provider trait.
    pub fn bind(&mut self, container: ContainerId, name: &str, value: Value) {
        if let Some(data) = self.container_mut(container) {
            data.bindings.insert(name.to_string(), value);
        }
    }

    /// Flatten every binding reachable from the root into `path → value`.
    /// Diagnostic projection: arena slots no longer reachable do not appear,
    /// so two namespaces with identical trees compare equal here even when
    /// their arenas diverged. Containers bound more than once are descended
    /// only at their first (lexicographically smallest) occurrence.
    pub fn flatten(&self) -> BTreeMap<String, Value> {
        let mut out = BTreeMap::new();
        let mut visited = vec![ROOT];
        self.flatten_into(ROOT, "", &mut visited, &mut out);
        out
    }

    fn flatten_into(
        &self,
        id: ContainerId,
        prefix: &str,
        visited: &mut Vec<ContainerId>,
        out: &mut BTreeMap<String, Value>,
    ) {
        let Some(data) = self.container(id) else {
            return;
        };
        for (name, value) in &data.bindings {
            let path = if prefix.is_empty() {
                name.clone()
            } else {
                format!("{prefix}::{name}")
            };
            out.insert(path.clone(), value.clone());
            if let Some(child) = value.container_id() {
                if !visited.contains(&child) {
                    visited.push(child);
                    self.flatten_into(child, &path, visited, out);
                }
            }
        }
    }

    // ─── Internal resolution ─────────────────────────────────────────

    fn alloc(&mut self, supertype: Option<ContainerId>) -> ContainerId {
        let id = ContainerId(self.containers.len() as u64);
        self.containers.push(ContainerData {
            bindings: BTreeMap::new(),
            supertype,
        });
        id
    }

    fn container(&self, id: ContainerId) -> Option<&ContainerData> {
        self.containers.get(id.0 as usize)
    }

    fn container_mut(&mut self, id: ContainerId) -> Option<&mut ContainerData> {
        self.containers.get_mut(id.0 as usize)
    }

    /// Resolve the parent container of `path` through owned bindings only.
    /// `Ok(None)` when an intermediate is missing.
    fn resolve_parent(&self, path: &ConstPath) -> Result<Option<ContainerId>, ConstError> {
        let mut current = ROOT;
        for segment in &path.segments()[..path.len() - 1] {
            let Some(data) = self.container(current) else {
                return Ok(None);
            };
            match data.bindings.get(segment) {
                Some(Value::Container(id)) => current = *id,
                Some(_) => {
                    return Err(ConstError::NotStubbable {
                        path: path.to_string(),
                        segment: segment.clone(),
                    });
                }
                None => return Ok(None),
            }
        }
        Ok(Some(current))
    }

    /// Resolve the parent container of `path`, allocating plain containers
    /// for missing intermediates.
    fn ensure_parent(&mut self, path: &ConstPath) -> Result<ContainerId, ConstError> {
        let mut current = ROOT;
        for segment in &path.segments()[..path.len() - 1] {
            let existing = self
                .container(current)
                .and_then(|data| data.bindings.get(segment))
                .cloned();
            match existing {
                Some(Value::Container(id)) => current = id,
                Some(_) => {
                    return Err(ConstError::NotStubbable {
                        path: path.to_string(),
                        segment: segment.clone(),
                    });
                }
                None => {
                    let fresh = self.define_container();
                    self.bind(current, segment, Value::Container(fresh));
                    current = fresh;
                }
            }
        }
        Ok(current)
    }
}

impl Default for Namespace {
    fn default() -> Self {
        Self::new()
    }
}

impl NamespaceProvider for Namespace {
    fn exists(&self, path: &ConstPath) -> Result<bool, ConstError> {
        match self.resolve_parent(path)? {
            Some(parent) => Ok(self
                .container(parent)
                .is_some_and(|data| data.bindings.contains_key(path.leaf()))),
            None => Ok(false),
        }
    }

    fn get(&self, path: &ConstPath) -> Result<Option<Value>, ConstError> {
        match self.resolve_parent(path)? {
            Some(parent) => Ok(self
                .container(parent)
                .and_then(|data| data.bindings.get(path.leaf()))
                .cloned()),
            None => Ok(None),
        }
    }

    fn set(&mut self, path: &ConstPath, value: Value) -> Result<(), ConstError> {
        let parent = self.ensure_parent(path)?;
        self.bind(parent, path.leaf(), value);
        Ok(())
    }

    fn remove(&mut self, path: &ConstPath) -> Result<Option<Value>, ConstError> {
        let Some(parent) = self.resolve_parent(path)? else {
            return Ok(None);
        };
        Ok(self
            .container_mut(parent)
            .and_then(|data| data.bindings.remove(path.leaf())))
    }

    fn owned_children(&self, container: &Value) -> Result<Vec<(String, Value)>, ConstError> {
        let data = container
            .container_id()
            .and_then(|id| self.container(id))
            .ok_or_else(|| {
                ConstError::InvalidTransfer("value cannot hold nested bindings".to_string())
            })?;
        Ok(data
            .bindings
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect())
    }

    fn is_container(&self, value: &Value) -> bool {
        matches!(value, Value::Container(_))
    }

    fn resolves_via_ancestors(&self, container: &Value, name: &str) -> bool {
        let Some(id) = container.container_id() else {
            return false;
        };
        let mut current = self.supertype(id);
        while let Some(ancestor) = current {
            if self
                .container(ancestor)
                .is_some_and(|data| data.bindings.contains_key(name))
            {
                return true;
            }
            current = self.supertype(ancestor);
        }
        // Unqualified lookups fall back to the root scope.
        id != ROOT
            && self
                .container(ROOT)
                .is_some_and(|data| data.bindings.contains_key(name))
    }
}
