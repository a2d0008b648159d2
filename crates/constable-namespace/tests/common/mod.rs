//! Shared world for integration tests: a root scope with a plain value, a
//! container hierarchy, a subtype, and a top-level name that collides with a
//! nested path.
//!
//! ```text
//! TOP_LEVEL_VALUE = 7
//! TestClass { M: :m, N: :n, Nested { NestedEvenMore {} } }
//! TestSubClass < TestClass { P: :p }
//! Hash {}
//! ```

#![allow(dead_code)]

use constable_core::{ConstPath, NamespaceProvider, Value};
use constable_namespace::Namespace;

pub fn world() -> Namespace {
    let mut ns = Namespace::new();
    let root = ns.root();
    ns.bind(root, "TOP_LEVEL_VALUE", Value::Int(7));

    let test_class = ns.define_container();
    ns.bind(root, "TestClass", Value::Container(test_class));
    ns.bind(test_class, "M", Value::sym("m"));
    ns.bind(test_class, "N", Value::sym("n"));

    let nested = ns.define_container();
    ns.bind(test_class, "Nested", Value::Container(nested));
    let nested_even_more = ns.define_container();
    ns.bind(nested, "NestedEvenMore", Value::Container(nested_even_more));

    let sub = ns.define_subtype(test_class);
    ns.bind(root, "TestSubClass", Value::Container(sub));
    ns.bind(sub, "P", Value::sym("p"));

    let hash = ns.define_container();
    ns.bind(root, "Hash", Value::Container(hash));

    ns
}

pub fn p(s: &str) -> ConstPath {
    ConstPath::parse(s).unwrap()
}

pub fn defined(ns: &Namespace, path: &str) -> bool {
    ns.exists(&p(path)).unwrap()
}

pub fn value(ns: &Namespace, path: &str) -> Option<Value> {
    ns.get(&p(path)).unwrap()
}
