//! Per-path mutation record.
//!
//! A [`ConstDescriptor`] is created exactly once per distinct path per test
//! lifecycle (between two teardown events) and pins the pre-test snapshot:
//!
//! - `existed_originally` / `original_value` — state at first touch
//! - `created_root` — for an originally-undefined binding, the shallowest
//!   segment that stubbing will create; teardown removes this root so only
//!   what the test introduced disappears
//!
//! Later stubs and hides update display state only; the snapshot fields are
//! never overwritten.

use serde::Serialize;

use crate::error::ConstError;
use crate::path::ConstPath;
use crate::provider::NamespaceProvider;
use crate::value::Value;

/// The latest applied effect on a binding, for introspection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationDisplay {
    Unstubbed,
    Stubbed(Value),
    Hidden,
}

/// Immutable-after-creation record of one path's pre-mutation state, plus the
/// mutation state applied during the current test.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstDescriptor {
    path: ConstPath,
    /// First-touch sequence number; teardown unwinds in reverse.
    seq: u64,
    existed_originally: bool,
    original_value: Option<Value>,
    created_root: Option<ConstPath>,
    is_hidden: bool,
    stubbed_value: Option<Value>,
}

impl ConstDescriptor {
    /// Capture the pre-mutation state of `path`. Called once per path, on
    /// first touch, before any mutation is applied.
    pub(crate) fn capture<N: NamespaceProvider>(
        ns: &N,
        path: ConstPath,
        seq: u64,
    ) -> Result<Self, ConstError> {
        let existed_originally = ns.exists(&path)?;
        let original_value = if existed_originally {
            ns.get(&path)?
        } else {
            None
        };
        let created_root = if existed_originally {
            None
        } else {
            Some(Self::first_undefined_prefix(ns, &path)?)
        };
        Ok(Self {
            path,
            seq,
            existed_originally,
            original_value,
            created_root,
            is_hidden: false,
            stubbed_value: None,
        })
    }

    /// The child of the deepest already-defined prefix: the shallowest path a
    /// stub will create, and the one teardown must remove.
    fn first_undefined_prefix<N: NamespaceProvider>(
        ns: &N,
        path: &ConstPath,
    ) -> Result<ConstPath, ConstError> {
        let mut deepest_defined = 0;
        for k in (1..path.len()).rev() {
            if ns.exists(&path.prefix(k))? {
                deepest_defined = k;
                break;
            }
        }
        Ok(path.prefix(deepest_defined + 1))
    }

    // ─── Query façade (read-only) ────────────────────────────────────

    /// Canonical path string.
    pub fn name(&self) -> String {
        self.path.to_string()
    }

    pub fn path(&self) -> &ConstPath {
        &self.path
    }

    /// Whether the binding was defined at descriptor-creation time.
    pub fn previously_defined(&self) -> bool {
        self.existed_originally
    }

    /// Whether the latest applied effect is a hide.
    pub fn hidden(&self) -> bool {
        self.is_hidden
    }

    /// The value captured at first touch, or `None` when the binding was not
    /// previously defined. Never errors.
    pub fn original_value(&self) -> Option<&Value> {
        self.original_value.as_ref()
    }

    /// The path teardown removes for an originally-undefined binding.
    pub fn created_root(&self) -> Option<&ConstPath> {
        self.created_root.as_ref()
    }

    /// First-touch order within the current test lifecycle.
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// The latest applied effect.
    pub fn display(&self) -> MutationDisplay {
        if self.is_hidden {
            MutationDisplay::Hidden
        } else if let Some(value) = &self.stubbed_value {
            MutationDisplay::Stubbed(value.clone())
        } else {
            MutationDisplay::Unstubbed
        }
    }

    // ─── Mutation state (registry-internal) ──────────────────────────

    pub(crate) fn record_stub(&mut self, value: Value) {
        self.stubbed_value = Some(value);
        self.is_hidden = false;
    }

    pub(crate) fn record_hide(&mut self) {
        self.is_hidden = true;
    }
}
