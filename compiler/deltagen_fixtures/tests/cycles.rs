//! Self-referential and mutually referential tracked types.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use deltagen_fixtures::graph::deltas::{LeftDelta, NodeDelta, NodeDeltaExt};
use deltagen_fixtures::graph::{Left, Node, Right};
use pretty_assertions::assert_eq;

fn paths(delta: &NodeDelta<'_>) -> Vec<String> {
    delta.all_deltas().map(|i| i.path().to_string()).collect()
}

#[test]
fn self_referential_chain_terminates() {
    let a = Node::chain(&[1, 2, 3]).expect("non-empty chain");
    let b = a.clone();
    let delta = a.delta_to(&b);

    assert!(!delta.has_any_deltas());
    assert!(paths(&delta).is_empty());
}

#[test]
fn deep_change_in_chain_has_full_path() {
    let a = Node::chain(&[1, 2, 3]).expect("non-empty chain");
    let b = Node::chain(&[1, 2, 4]).expect("non-empty chain");
    let delta = NodeDelta::new(Some(&a), Some(&b));

    assert!(delta.has_any_deltas());
    assert_eq!(paths(&delta), ["next.next.value"]);
    assert!(delta.next().next().value().has_changed());
}

#[test]
fn longer_chain_reports_new_links() {
    let a = Node::chain(&[1]).expect("non-empty chain");
    let b = Node::chain(&[1, 2]).expect("non-empty chain");
    let delta = NodeDelta::new(Some(&a), Some(&b));

    assert_eq!(paths(&delta), ["next.value"]);
    let root: Vec<String> = delta.root_deltas().map(|i| i.path().to_string()).collect();
    assert_eq!(root, ["next"]);
}

#[test]
fn mutually_referential_types_terminate() {
    let a = Left {
        id: 1,
        right: Some(Box::new(Right {
            id: 2,
            left: Some(Box::new(Left { id: 3, right: None })),
        })),
    };
    let mut b = a.clone();
    if let Some(right) = b.right.as_mut() {
        right.id = 20;
    }
    let delta = LeftDelta::new(Some(&a), Some(&b));

    let changed: Vec<String> = delta.deltas().map(|c| c.path().to_string()).collect();
    assert_eq!(changed, ["right.id"]);
    assert!(!delta.right().left().right().has_any_deltas());
}
