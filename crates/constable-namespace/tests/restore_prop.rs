//! Property coverage: any sequence of stubs and hides over a fixed path pool
//! restores the namespace to its exact pre-test tree at teardown.

mod common;

use common::world;
use constable_core::{StubSession, Value};
use proptest::prelude::*;

const PATHS: &[&str] = &[
    "TOP_LEVEL_VALUE",
    "TestClass",
    "TestClass::M",
    "TestClass::Nested",
    "TestClass::Nested::NestedEvenMore",
    "TestClass::Nested::NestedEvenMore::X::Y::Z",
    "TestClass::Hash",
    "TestSubClass",
    "TestSubClass::M",
    "Hash",
    "X",
    "X::Y",
];

#[derive(Debug, Clone)]
enum Op {
    Stub(usize, i64),
    StubContainer(usize),
    Hide(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..PATHS.len(), -100i64..100).prop_map(|(i, v)| Op::Stub(i, v)),
        (0..PATHS.len()).prop_map(Op::StubContainer),
        (0..PATHS.len()).prop_map(Op::Hide),
    ]
}

proptest! {
    #[test]
    fn any_mutation_sequence_restores_the_tree(
        ops in proptest::collection::vec(op_strategy(), 0..24),
    ) {
        let ns = world();
        let before = ns.flatten();

        let mut session = StubSession::new(ns);
        for op in ops {
            // Individual operations may fail (non-container intermediates,
            // collision guard); the restore guarantee must hold regardless.
            match op {
                Op::Stub(i, v) => {
                    let _ = session.stub(PATHS[i], Value::Int(v));
                }
                Op::StubContainer(i) => {
                    let container = Value::Container(session.ns_mut().define_container());
                    let _ = session.stub(PATHS[i], container);
                }
                Op::Hide(i) => {
                    let _ = session.hide(PATHS[i]);
                }
            }
        }
        session.teardown();

        prop_assert_eq!(session.ns().flatten(), before);
    }
}
