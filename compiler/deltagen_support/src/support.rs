// Shared support types for generated delta types.
//
// This file is compiled as part of `deltagen_support` and emitted verbatim as
// `DeltaSupport.g.rs`. It must stay self-contained: no crate-relative paths,
// no inner attributes, `std` only.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

/// Object-safe view of a comparable, debuggable value.
trait ErasedCompare: Any + fmt::Debug {
    fn as_any(&self) -> &dyn Any;
    fn eq_erased(&self, other: &dyn ErasedCompare) -> bool;
}

impl<T> ErasedCompare for T
where
    T: Any + fmt::Debug + PartialEq,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq_erased(&self, other: &dyn ErasedCompare) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }
}

/// A property value with its static type erased.
///
/// Two erased values are equal when they hold the same type and that type's
/// `PartialEq` says so.
#[derive(Clone)]
pub struct ErasedValue(Rc<dyn ErasedCompare>);

impl ErasedValue {
    pub fn new<T>(value: T) -> Self
    where
        T: Any + fmt::Debug + PartialEq,
    {
        ErasedValue(Rc::new(value))
    }

    /// Borrow the value as `T`, if that is what it holds.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.as_any().downcast_ref::<T>()
    }
}

impl PartialEq for ErasedValue {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_erased(&*other.0)
    }
}

impl fmt::Debug for ErasedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

/// The previous and current value of one property.
///
/// Immutable; `has_changed` is fixed at construction using `T`'s equality.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyDelta<T> {
    previous: T,
    current: T,
    has_changed: bool,
}

impl<T: PartialEq> PropertyDelta<T> {
    pub fn new(previous: T, current: T) -> Self {
        let has_changed = previous != current;
        PropertyDelta {
            previous,
            current,
            has_changed,
        }
    }
}

impl<T> PropertyDelta<T> {
    pub fn previous(&self) -> &T {
        &self.previous
    }

    pub fn current(&self) -> &T {
        &self.current
    }

    pub fn has_changed(&self) -> bool {
        self.has_changed
    }
}

impl<T> PropertyDelta<T>
where
    T: Clone + fmt::Debug + PartialEq + 'static,
{
    /// Project into a `PropertyChange` reported at `path`.
    pub fn to_change(&self, path: &str) -> PropertyChange {
        PropertyChange::new(
            path,
            ErasedValue::new(self.previous.clone()),
            ErasedValue::new(self.current.clone()),
        )
    }

    /// Project into a `DeltaInfo` reported at `path`.
    pub fn to_delta_info(&self, path: &str) -> DeltaInfo {
        DeltaInfo::new(
            path,
            ErasedValue::new(self.previous.clone()),
            ErasedValue::new(self.current.clone()),
            std::any::type_name::<T>(),
        )
    }
}

/// A changed property, addressed by a dotted path from the compared root.
#[derive(Clone, Debug, PartialEq)]
pub struct PropertyChange {
    path: String,
    previous_value: ErasedValue,
    current_value: ErasedValue,
}

impl PropertyChange {
    pub fn new(path: &str, previous_value: ErasedValue, current_value: ErasedValue) -> Self {
        PropertyChange {
            path: path.to_string(),
            previous_value,
            current_value,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn previous_value(&self) -> &ErasedValue {
        &self.previous_value
    }

    pub fn current_value(&self) -> &ErasedValue {
        &self.current_value
    }

    /// Re-root the change under `prefix` (`value` becomes `child.value`).
    #[must_use]
    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.path = format!("{prefix}.{}", self.path);
        self
    }
}

impl fmt::Display for PropertyChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {:?} -> {:?}",
            self.path, self.previous_value, self.current_value
        )
    }
}

/// One entry of a whole-object change listing.
///
/// Coarser than `PropertyChange`: it also records the property's declared
/// type, and nested objects may be reported as a single entry.
#[derive(Clone, Debug, PartialEq)]
pub struct DeltaInfo {
    path: String,
    previous_value: ErasedValue,
    current_value: ErasedValue,
    declared_type: &'static str,
}

impl DeltaInfo {
    pub fn new(
        path: &str,
        previous_value: ErasedValue,
        current_value: ErasedValue,
        declared_type: &'static str,
    ) -> Self {
        DeltaInfo {
            path: path.to_string(),
            previous_value,
            current_value,
            declared_type,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn previous_value(&self) -> &ErasedValue {
        &self.previous_value
    }

    pub fn current_value(&self) -> &ErasedValue {
        &self.current_value
    }

    /// `std::any::type_name` of the property's declared type.
    pub fn declared_type(&self) -> &'static str {
        self.declared_type
    }

    /// Re-root the entry under `prefix`.
    #[must_use]
    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.path = format!("{prefix}.{}", self.path);
        self
    }
}

impl fmt::Display for DeltaInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): {:?} -> {:?}",
            self.path, self.declared_type, self.previous_value, self.current_value
        )
    }
}

/// Capability every generated delta type provides.
pub trait DeltaTracker {
    /// True if any tracked property, at any depth, differs.
    fn has_any_deltas(&self) -> bool;

    /// Every changed leaf property, nested paths flattened.
    ///
    /// The iterator is lazy and can be obtained again to restart.
    fn all_deltas(&self) -> Box<dyn Iterator<Item = DeltaInfo> + '_>;
}

/// Target of a `has_delta_in` selector.
///
/// Implemented by `PropertyDelta<T>` (its `has_changed`) and by every
/// generated delta type (its `has_any_deltas`).
pub trait HasDelta {
    fn has_delta(&self) -> bool;
}

impl<T> HasDelta for PropertyDelta<T> {
    fn has_delta(&self) -> bool {
        self.has_changed
    }
}
