//! Nested tracked properties.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use deltagen_fixtures::catalog::deltas::{ChildDelta, ListingDelta, ParentDelta, ParentDeltaExt};
use deltagen_fixtures::catalog::{Child, Listing, Parent};
use deltagen_fixtures::graph::Node;
use deltagen_fixtures::settings::deltas::SnapshotDelta;
use deltagen_fixtures::settings::{Preferences, Snapshot};
use pretty_assertions::assert_eq;

fn child(value: i32) -> Child {
    Child {
        value,
        label: "c".to_string(),
    }
}

fn parent(name: &str, value: i32) -> Parent {
    Parent {
        name: name.to_string(),
        child: child(value),
        spare: None,
        boxed: Box::new(child(0)),
    }
}

fn paths<I, T>(items: I, path: impl Fn(&T) -> &str) -> Vec<String>
where
    I: Iterator<Item = T>,
{
    items.map(|item| path(&item).to_string()).collect()
}

#[test]
fn nested_change_is_visible_from_the_parent() {
    let a = parent("p", 1);
    let b = parent("p", 2);
    let delta = ParentDelta::new(Some(&a), Some(&b));

    assert!(delta.has_any_deltas());
    assert!(!delta.name().has_changed());
    assert!(delta.child().has_any_deltas());
    assert!(delta.child().value().has_changed());
}

#[test]
fn all_deltas_flattens_nested_paths() {
    let a = parent("p", 1);
    let b = parent("p", 2);
    let delta = ParentDelta::new(Some(&a), Some(&b));

    assert_eq!(paths(delta.all_deltas(), |i| i.path()), ["child.value"]);
    assert_eq!(paths(delta.deltas(), |c| c.path()), ["child.value"]);
}

#[test]
fn root_deltas_reports_nested_property_once() {
    let mut a = parent("p", 1);
    let mut b = parent("p", 2);
    a.child.label = "x".to_string();
    b.child.label = "y".to_string();
    let delta = ParentDelta::new(Some(&a), Some(&b));

    assert_eq!(delta.all_deltas().count(), 2);
    let roots: Vec<_> = delta.root_deltas().collect();
    assert_eq!(roots.len(), 1);
    assert_eq!(roots[0].path(), "child");
    assert_eq!(roots[0].declared_type(), std::any::type_name::<Child>());
    assert_eq!(
        roots[0].previous_value().downcast_ref::<Option<Child>>(),
        Some(&Some(a.child.clone()))
    );
    assert_eq!(
        roots[0].current_value().downcast_ref::<Option<Child>>(),
        Some(&Some(b.child.clone()))
    );
}

#[test]
fn optional_nested_property_appears_and_disappears() {
    let a = parent("p", 1);
    let mut b = a.clone();
    b.spare = Some(child(9));
    let delta = ParentDelta::new(Some(&a), Some(&b));

    assert!(delta.spare().has_any_deltas());
    assert!(delta.spare().previous().is_none());
    assert_eq!(delta.spare().current(), Some(&child(9)));
    assert_eq!(
        paths(delta.all_deltas(), |i| i.path()),
        ["spare.value", "spare.label"]
    );

    let back = ParentDelta::new(Some(&b), Some(&a));
    assert!(back.spare().current().is_none());
    assert!(back.has_any_deltas());
}

#[test]
fn both_sides_absent_for_nested_property() {
    let a = parent("p", 1);
    let b = a.clone();
    let delta = ParentDelta::new(Some(&a), Some(&b));

    let spare: &ChildDelta<'_> = delta.spare();
    assert!(spare.previous().is_none());
    assert!(spare.current().is_none());
    assert!(!spare.has_any_deltas());
    assert!(!delta.has_any_deltas());
}

#[test]
fn boxed_nested_property_is_looked_through() {
    let a = parent("p", 1);
    let mut b = a.clone();
    b.boxed.label = "boxed".to_string();
    let delta = a.delta_to(&b);

    assert!(delta.boxed().label().has_changed());
    assert_eq!(paths(delta.deltas(), |c| c.path()), ["boxed.label"]);
}

#[test]
fn has_delta_in_accepts_nested_selectors() {
    let a = parent("p", 1);
    let b = parent("p", 2);
    let delta = ParentDelta::new(Some(&a), Some(&b));

    assert!(delta.has_delta_in(|d| d.child()));
    assert!(!delta.has_delta_in(|d| d.boxed()));
    assert!(delta.has_delta_in(|d| d.child().value()));
}

#[test]
fn nested_type_from_another_module() {
    let a = Listing {
        title: "t".to_string(),
        tags: vec!["x".to_string()],
        origin: Node::chain(&[1, 2]),
    };
    let mut b = a.clone();
    b.origin = Node::chain(&[1, 3]);
    b.tags.push("y".to_string());
    let delta = ListingDelta::new(Some(&a), Some(&b));

    assert_eq!(
        paths(delta.all_deltas(), |i| i.path()),
        ["tags", "origin.next.value"]
    );
}

#[test]
fn shallow_tracking_compares_nested_value_whole() {
    let a = Snapshot {
        label: "s".to_string(),
        preferences: Preferences {
            theme: "light".to_string(),
            font_size: 10,
        },
    };
    let mut b = a.clone();
    b.preferences.font_size = 11;
    let delta = SnapshotDelta::new(Some(&a), Some(&b));

    assert!(delta.preferences().has_changed());
    assert_eq!(delta.preferences().current().font_size, 11);
    assert_eq!(paths(delta.all_deltas(), |i| i.path()), ["preferences"]);
}
