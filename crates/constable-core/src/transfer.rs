//! Bulk transfer of owned child bindings onto a replacement container.
//!
//! Invoked only from stub when a transfer request is present. The engine is
//! validate-then-commit: `plan` performs every check and reads every value to
//! copy *before* the stub touches the namespace, so any failure leaves the
//! live binding and the namespace exactly as they were.

use serde::{Deserialize, Serialize};

use crate::error::ConstError;
use crate::path::ConstPath;
use crate::provider::NamespaceProvider;
use crate::value::Value;

/// Which child bindings to copy from the original container onto the stub.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transfer {
    /// Copy nothing (the default).
    #[default]
    None,
    /// Copy every binding the original container owns. Silently ignored when
    /// the binding is not currently defined.
    All,
    /// Copy exactly these child names; each must be owned by the original.
    Only(Vec<String>),
}

/// Validate a transfer request against the current live state and return the
/// `(name, value)` pairs to copy onto the replacement after it is installed.
pub(crate) fn plan<N: NamespaceProvider>(
    ns: &N,
    path: &ConstPath,
    replacement: &Value,
    transfer: &Transfer,
) -> Result<Vec<(String, Value)>, ConstError> {
    let requested: Option<&[String]> = match transfer {
        Transfer::None => return Ok(Vec::new()),
        Transfer::All => None,
        Transfer::Only(names) => Some(names),
    };

    let Some(original) = ns.get(path)? else {
        return match requested.and_then(|names| names.first()) {
            // Nothing exists to copy from; an explicit request is an error,
            // a blanket one is ignored.
            Some(name) => Err(ConstError::InvalidTransfer(format!(
                "`{name}` cannot be transferred: `{path}` is not defined"
            ))),
            None => Ok(Vec::new()),
        };
    };

    if !ns.is_container(replacement) {
        return Err(ConstError::InvalidTransfer(format!(
            "replacement for `{path}` cannot hold nested bindings"
        )));
    }
    if !ns.is_container(&original) {
        return Err(ConstError::InvalidTransfer(format!(
            "`{path}` cannot hold nested bindings"
        )));
    }

    let owned = ns.owned_children(&original)?;
    match requested {
        None => Ok(owned),
        Some(names) => {
            let mut picked = Vec::with_capacity(names.len());
            for name in names {
                match owned.iter().find(|(child, _)| child == name) {
                    Some((child, value)) => picked.push((child.clone(), value.clone())),
                    None => {
                        return Err(ConstError::InvalidTransfer(format!(
                            "`{name}` is not owned by `{path}`"
                        )));
                    }
                }
            }
            Ok(picked)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::mock::FlatNs;

    fn path(s: &str) -> ConstPath {
        ConstPath::parse(s).unwrap()
    }

    fn sample() -> (FlatNs, Value) {
        let mut ns = FlatNs::new();
        let orig = ns.define_container("Orig");
        ns.define("Orig::M", Value::sym("m"));
        ns.define("Orig::N", Value::sym("n"));
        ns.add_ancestor_binding(&orig, "P");
        (ns, orig)
    }

    #[test]
    fn none_copies_nothing() {
        let (ns, _) = sample();
        let replacement = Value::Int(1);
        let plan = plan(&ns, &path("Orig"), &replacement, &Transfer::None).unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn all_copies_every_owned_child() {
        let (mut ns, _) = sample();
        let replacement = ns.fresh_container();
        let plan = plan(&ns, &path("Orig"), &replacement, &Transfer::All).unwrap();
        assert_eq!(
            plan,
            vec![
                ("M".to_string(), Value::sym("m")),
                ("N".to_string(), Value::sym("n")),
            ]
        );
    }

    #[test]
    fn inherited_children_are_never_planned() {
        let (mut ns, _) = sample();
        let replacement = ns.fresh_container();
        let plan = plan(&ns, &path("Orig"), &replacement, &Transfer::All).unwrap();
        assert!(plan.iter().all(|(name, _)| name != "P"));
    }

    #[test]
    fn explicit_list_picks_exactly_those_names() {
        let (mut ns, _) = sample();
        let replacement = ns.fresh_container();
        let only = Transfer::Only(vec!["M".to_string()]);
        let plan = plan(&ns, &path("Orig"), &replacement, &only).unwrap();
        assert_eq!(plan, vec![("M".to_string(), Value::sym("m"))]);
    }

    #[test]
    fn explicit_inherited_name_fails_naming_it() {
        let (mut ns, _) = sample();
        let replacement = ns.fresh_container();
        let only = Transfer::Only(vec!["P".to_string()]);
        let err = plan(&ns, &path("Orig"), &replacement, &only).unwrap_err();
        assert!(err.to_string().contains("`P`"));
    }

    #[test]
    fn non_container_replacement_fails() {
        let (ns, _) = sample();
        let err = plan(&ns, &path("Orig"), &Value::Int(0), &Transfer::All).unwrap_err();
        assert!(matches!(err, ConstError::InvalidTransfer(_)));
    }

    #[test]
    fn non_container_original_fails() {
        let mut ns = FlatNs::new();
        ns.define("SEVEN", 7.into());
        let replacement = ns.fresh_container();
        let err = plan(&ns, &path("SEVEN"), &replacement, &Transfer::All).unwrap_err();
        assert!(matches!(err, ConstError::InvalidTransfer(_)));
    }

    #[test]
    fn undefined_original_ignores_blanket_request() {
        let mut ns = FlatNs::new();
        let replacement = ns.fresh_container();
        let plan = plan(&ns, &path("X"), &replacement, &Transfer::All).unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn undefined_original_rejects_explicit_request() {
        let mut ns = FlatNs::new();
        let replacement = ns.fresh_container();
        let only = Transfer::Only(vec!["M".to_string()]);
        let err = plan(&ns, &path("X"), &replacement, &only).unwrap_err();
        assert!(err.to_string().contains("`M`"));
    }
}
