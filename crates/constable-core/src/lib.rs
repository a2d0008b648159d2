//! constable-core: temporarily stub or hide named bindings in a hierarchical
//! namespace, with guaranteed restoration at the test boundary.
//!
//! - **Entity key**: [`ConstPath`] (`::`-separated segment names)
//! - **Unit of tracking**: [`ConstDescriptor`] (one per path per test lifecycle)
//!
//! ## Components
//!
//! - [`ConstPath`] — path parsing and parent/leaf splitting
//! - [`NamespaceProvider`] — the one seam isolating host namespace reflection
//! - [`MutationRegistry`] — path → descriptor table, drained at teardown
//! - [`Transfer`] — opt-in bulk copy of owned child bindings onto a stub
//! - [`StubSession`] — RAII harness that restores on drop
//!
//! ## Key guarantees
//!
//! - original state is captured once, at first touch; stacked stubs/hides on
//!   one path collapse to a single restore
//! - transfer validation is all-or-nothing: a failed stub leaves the live
//!   namespace untouched
//! - teardown never panics or errors; unrestorable paths are logged and skipped

pub mod descriptor;
pub mod error;
pub mod path;
pub mod provider;
pub mod registry;
pub mod session;
pub mod transfer;
pub mod value;

pub use descriptor::{ConstDescriptor, MutationDisplay};
pub use error::ConstError;
pub use path::ConstPath;
pub use provider::NamespaceProvider;
pub use registry::{ConstHandle, MutationRegistry};
pub use session::StubSession;
pub use transfer::Transfer;
pub use value::{ContainerId, Value};
