//! Dynamic values held by namespace bindings.

use serde::{Deserialize, Serialize};

/// Opaque handle to a container slot in the backing namespace.
///
/// Containers compare by identity: restoring a binding hands back the *same*
/// container, not a structural copy.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ContainerId(pub u64);

/// A value a binding can hold: scalars, or a reference to a container capable
/// of owning further named bindings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
    Sym(String),
    Container(ContainerId),
}

impl Value {
    /// Symbol-like constant value.
    pub fn sym(name: impl Into<String>) -> Self {
        Self::Sym(name.into())
    }

    pub fn str(s: impl Into<String>) -> Self {
        Self::Str(s.into())
    }

    /// The container handle, if this value is a container.
    pub fn container_id(&self) -> Option<ContainerId> {
        match self {
            Self::Container(id) => Some(*id),
            _ => None,
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<ContainerId> for Value {
    fn from(id: ContainerId) -> Self {
        Self::Container(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn container_identity() {
        assert_eq!(Value::Container(ContainerId(3)), ContainerId(3).into());
        assert_ne!(
            Value::Container(ContainerId(3)),
            Value::Container(ContainerId(4))
        );
    }

    #[test]
    fn container_id_accessor() {
        assert_eq!(Value::from(7).container_id(), None);
        assert_eq!(
            Value::Container(ContainerId(1)).container_id(),
            Some(ContainerId(1))
        );
    }

    #[test]
    fn serde_round_trip_shape() {
        // Spot-check the wire shape used by scenario fixtures.
        let v = Value::sym("m");
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, r#"{"sym":"m"}"#);
    }
}
