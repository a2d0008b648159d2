//! Error types for the stubbing engine.
//!
//! All failures are programmer-error-class: they surface synchronously to the
//! caller and fail the test immediately. A failed call leaves the namespace
//! and registry unchanged, apart from the harmless descriptor creation done by
//! the preceding ensure step. Restoration never raises; it logs and skips.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstError {
    /// Malformed path string (empty, or an empty segment).
    #[error("invalid binding path: {0:?}")]
    InvalidPath(String),

    /// An intermediate path segment exists but cannot hold nested bindings.
    #[error("cannot stub {path}: intermediate segment `{segment}` is not a container")]
    NotStubbable { path: String, segment: String },

    /// A transfer request failed validation. The message names the specific
    /// missing or incompatible binding.
    #[error("cannot transfer nested bindings: {0}")]
    InvalidTransfer(String),

    /// Hiding a nested path whose leaf is owned by an ancestor scope rather
    /// than the parent container itself.
    #[error("cannot hide {path}: `{name}` is owned by an ancestor scope")]
    AncestorCollision { path: String, name: String },
}
