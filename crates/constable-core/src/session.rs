//! RAII test-lifecycle integration.
//!
//! The test framework's only obligation is to call `teardown` once per test
//! boundary; [`StubSession`] turns that into drop semantics, so a panicking
//! test still restores every binding it mutated.

use crate::descriptor::ConstDescriptor;
use crate::error::ConstError;
use crate::provider::NamespaceProvider;
use crate::registry::{ConstHandle, MutationRegistry};
use crate::transfer::Transfer;
use crate::value::Value;

/// Owns a namespace provider and a registry; restores on drop.
#[derive(Debug)]
pub struct StubSession<N: NamespaceProvider> {
    ns: N,
    registry: MutationRegistry,
}

impl<N: NamespaceProvider> StubSession<N> {
    pub fn new(ns: N) -> Self {
        Self {
            ns,
            registry: MutationRegistry::new(),
        }
    }

    pub fn ns(&self) -> &N {
        &self.ns
    }

    pub fn ns_mut(&mut self) -> &mut N {
        &mut self.ns
    }

    pub fn registry(&self) -> &MutationRegistry {
        &self.registry
    }

    /// Mutation handle on `path`, creating its descriptor on first touch.
    pub fn on(&mut self, path: &str) -> Result<ConstHandle<'_, N>, ConstError> {
        self.registry.on(&mut self.ns, path)
    }

    /// `on(path).stub(value)`.
    pub fn stub(&mut self, path: &str, value: Value) -> Result<Value, ConstError> {
        self.on(path)?.stub(value)
    }

    /// `on(path).stub_with(value, transfer)`.
    pub fn stub_with(
        &mut self,
        path: &str,
        value: Value,
        transfer: Transfer,
    ) -> Result<Value, ConstError> {
        self.on(path)?.stub_with(value, transfer)
    }

    /// `on(path).hide()`.
    pub fn hide(&mut self, path: &str) -> Result<(), ConstError> {
        self.on(path)?.hide()
    }

    /// Non-creating descriptor query.
    pub fn lookup(&self, path: &str) -> Option<&ConstDescriptor> {
        self.registry.lookup(path)
    }

    /// Restore every mutated binding now. Also runs on drop; calling it
    /// explicitly mid-session starts a fresh lifecycle.
    pub fn teardown(&mut self) {
        self.registry.teardown(&mut self.ns);
    }
}

impl<N: NamespaceProvider> Drop for StubSession<N> {
    fn drop(&mut self) {
        self.teardown();
    }
}
