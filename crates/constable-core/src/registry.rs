//! Mutation registry: path → descriptor table and the stub/hide operations.
//!
//! Lifecycle:
//!
//! - empty at process start
//! - grows monotonically during a test: `on` creates at most one descriptor
//!   per distinct path, so repeated stub/hide calls on the same path stack on
//!   a single pre-test snapshot
//! - fully drained at `teardown`: every descriptor is restored, then dropped
//!
//! The registry is an explicit owned object, passed the provider at each call
//! site; it is never a global singleton.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use crate::descriptor::ConstDescriptor;
use crate::error::ConstError;
use crate::path::ConstPath;
use crate::provider::NamespaceProvider;
use crate::transfer::{self, Transfer};
use crate::value::Value;

/// Process-wide map from resolved path to its live descriptor.
#[derive(Debug, Default)]
pub struct MutationRegistry {
    descriptors: BTreeMap<ConstPath, ConstDescriptor>,
    next_seq: u64,
}

impl MutationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Descriptor for `path` if one was created during this test, without
    /// creating one. Malformed paths answer `None`.
    pub fn lookup(&self, path: &str) -> Option<&ConstDescriptor> {
        let path = ConstPath::parse(path).ok()?;
        self.descriptors.get(&path)
    }

    /// Handle on `path`, creating its descriptor (and capturing original
    /// state) on first touch.
    pub fn on<'r, N: NamespaceProvider>(
        &'r mut self,
        ns: &'r mut N,
        path: &str,
    ) -> Result<ConstHandle<'r, N>, ConstError> {
        let path = ConstPath::parse(path)?;
        let descriptor = match self.descriptors.entry(path) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let descriptor =
                    ConstDescriptor::capture(&*ns, entry.key().clone(), self.next_seq)?;
                self.next_seq += 1;
                entry.insert(descriptor)
            }
        };
        Ok(ConstHandle { descriptor, ns })
    }

    /// Restore every tracked binding to its pre-test state and clear the
    /// registry. Never errors: unrestorable paths are logged and skipped so a
    /// corrupted path cannot cascade into later tests.
    ///
    /// Descriptors unwind in reverse first-touch order. Independent paths
    /// restore correctly in any order; reverse order additionally handles a
    /// hidden binding recreated underneath by a later deep stub.
    pub fn teardown<N: NamespaceProvider>(&mut self, ns: &mut N) {
        let mut descriptors: Vec<(ConstPath, ConstDescriptor)> =
            std::mem::take(&mut self.descriptors).into_iter().collect();
        descriptors.sort_by_key(|(_, descriptor)| std::cmp::Reverse(descriptor.seq()));
        for (path, descriptor) in descriptors {
            restore(ns, &path, &descriptor);
        }
    }
}

/// Apply one descriptor's restoration, best-effort.
fn restore<N: NamespaceProvider>(ns: &mut N, path: &ConstPath, descriptor: &ConstDescriptor) {
    if descriptor.previously_defined() {
        if let Some(original) = descriptor.original_value() {
            if let Err(err) = ns.set(path, original.clone()) {
                tracing::warn!(path = %path, %err, "failed to restore original binding");
            }
        }
        return;
    }
    // Remove what the test introduced: the shallowest created segment, not
    // just the leaf, so intermediate containers created on demand go too.
    let root = descriptor.created_root().unwrap_or(path);
    match ns.exists(root) {
        Ok(true) => {
            if let Err(err) = ns.remove(root) {
                tracing::warn!(path = %root, %err, "failed to remove created binding");
            }
        }
        Ok(false) => {}
        Err(err) => {
            tracing::warn!(path = %root, %err, "cannot resolve created binding during teardown");
        }
    }
}

/// Mutation handle for one path. Obtained from [`MutationRegistry::on`]; each
/// handle applies exactly one effect.
pub struct ConstHandle<'r, N: NamespaceProvider> {
    descriptor: &'r mut ConstDescriptor,
    ns: &'r mut N,
}

impl<'r, N: NamespaceProvider> ConstHandle<'r, N> {
    /// The descriptor backing this handle.
    pub fn descriptor(&self) -> &ConstDescriptor {
        self.descriptor
    }

    /// Replace the live binding with `value`. Returns the value.
    pub fn stub(self, value: Value) -> Result<Value, ConstError> {
        self.stub_with(value, Transfer::None)
    }

    /// Replace the live binding with `value`, optionally copying owned child
    /// bindings from the current value onto it.
    ///
    /// All transfer validation happens before any namespace mutation; a
    /// failure leaves the live binding untouched.
    pub fn stub_with(self, value: Value, transfer: Transfer) -> Result<Value, ConstError> {
        let path = self.descriptor.path().clone();
        let planned = transfer::plan(&*self.ns, &path, &value, &transfer)?;
        self.ns.set(&path, value.clone())?;
        for (name, child) in planned {
            self.ns.set(&path.child(&name), child)?;
        }
        self.descriptor.record_stub(value.clone());
        Ok(value)
    }

    /// Remove the live binding if the parent container owns it; otherwise a
    /// no-op that still marks the descriptor hidden. Idempotent, except for
    /// the ancestor-collision guard below.
    ///
    /// Hiding a nested path whose leaf is not owned by its parent but *is*
    /// reachable through the parent's ancestor scopes never touches the outer
    /// binding; a second hide attempt on such a path fails with
    /// [`ConstError::AncestorCollision`].
    pub fn hide(self) -> Result<(), ConstError> {
        let path = self.descriptor.path().clone();
        if self.ns.exists(&path)? {
            self.ns.remove(&path)?;
        } else if !path.is_toplevel() {
            self.guard_ancestor_collision(&path)?;
        }
        self.descriptor.record_hide();
        Ok(())
    }

    fn guard_ancestor_collision(&self, path: &ConstPath) -> Result<(), ConstError> {
        if !self.descriptor.hidden() {
            return Ok(());
        }
        let Some(parent) = self.ns.get(&path.parent())? else {
            return Ok(());
        };
        if self.ns.is_container(&parent) && self.ns.resolves_via_ancestors(&parent, path.leaf()) {
            return Err(ConstError::AncestorCollision {
                path: path.to_string(),
                name: path.leaf().to_string(),
            });
        }
        Ok(())
    }
}
