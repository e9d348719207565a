use super::*;
use pretty_assertions::assert_eq;

#[test]
fn property_delta_detects_change() {
    let delta = PropertyDelta::new("A".to_string(), "B".to_string());
    assert!(delta.has_changed());
    assert_eq!(delta.previous(), "A");
    assert_eq!(delta.current(), "B");
}

#[test]
fn property_delta_equal_values_unchanged() {
    let delta = PropertyDelta::new(1, 1);
    assert!(!delta.has_changed());
    assert!(!delta.has_delta());
}

#[test]
fn property_delta_uses_value_equality() {
    let delta = PropertyDelta::new(vec![1, 2, 3], vec![1, 2, 3]);
    assert!(!delta.has_changed());

    let delta = PropertyDelta::new(Some(vec![1]), None);
    assert!(delta.has_changed());
}

#[test]
fn change_projection_keeps_values() {
    let delta = PropertyDelta::new(false, true);
    let change = delta.to_change("is_active");
    assert_eq!(change.path(), "is_active");
    assert_eq!(change.previous_value().downcast_ref::<bool>(), Some(&false));
    assert_eq!(change.current_value().downcast_ref::<bool>(), Some(&true));
}

#[test]
fn delta_info_records_declared_type() {
    let delta = PropertyDelta::new(1_i32, 2_i32);
    let info = delta.to_delta_info("value");
    assert_eq!(info.path(), "value");
    assert_eq!(info.declared_type(), "i32");
}

#[test]
fn with_prefix_builds_dotted_paths() {
    let change = PropertyDelta::new(1, 2).to_change("value");
    let change = change.with_prefix("child").with_prefix("parent");
    assert_eq!(change.path(), "parent.child.value");

    let info = PropertyDelta::new(1, 2).to_delta_info("value").with_prefix("child");
    assert_eq!(info.path(), "child.value");
}

#[test]
fn erased_values_compare_by_type_and_value() {
    assert_eq!(ErasedValue::new(5_u8), ErasedValue::new(5_u8));
    assert_ne!(ErasedValue::new(5_u8), ErasedValue::new(6_u8));
    assert_ne!(ErasedValue::new(5_u8), ErasedValue::new(5_u16));
    assert_eq!(ErasedValue::new(5_u8).downcast_ref::<u16>(), None);
}

#[test]
fn single_threaded_values_are_supported() {
    use std::cell::Cell;
    use std::rc::Rc;

    let body: Rc<str> = Rc::from("draft");
    let change = PropertyDelta::new(body, Rc::from("final")).to_change("body");
    assert_eq!(
        change.current_value().downcast_ref::<Rc<str>>().map(|s| &**s),
        Some("final")
    );

    let info = PropertyDelta::new(Cell::new(1_u32), Cell::new(2_u32)).to_delta_info("views");
    assert_eq!(info.previous_value().downcast_ref::<Cell<u32>>(), Some(&Cell::new(1)));
}

#[test]
fn erased_value_debug_is_the_inner_debug() {
    assert_eq!(format!("{:?}", ErasedValue::new("x")), "\"x\"");
}

#[test]
fn display_formats() {
    let change = PropertyDelta::new(1, 2).to_change("value");
    assert_eq!(change.to_string(), "value: 1 -> 2");

    let info = PropertyDelta::new(1_i64, 2_i64).to_delta_info("value");
    assert_eq!(info.to_string(), "value (i64): 1 -> 2");
}

#[test]
fn support_source_is_self_contained() {
    assert!(!SUPPORT_SOURCE.contains("crate::"));
    assert!(!SUPPORT_SOURCE.contains("#!["));
    assert!(SUPPORT_SOURCE.contains("pub trait DeltaTracker"));
    assert!(SUPPORT_SOURCE.contains("pub struct PropertyDelta<T>"));
}
