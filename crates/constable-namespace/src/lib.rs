//! constable-namespace: in-memory namespace backend.
//!
//! An arena of containers with optional supertype links, implementing the
//! [`constable_core::NamespaceProvider`] seam. Containers are addressed by
//! [`constable_core::ContainerId`], so binding values compare by identity and
//! restoration hands back the exact original container.

pub mod arena;

pub use arena::Namespace;
