//! Runtime support for generated delta types.
//!
//! The generator emits `src/support.rs` verbatim as the shared support unit
//! (`DeltaSupport.g.rs`) once per run, so generated code does not need a
//! runtime dependency. Crates that prefer one can point the generator's
//! support path at this crate instead and mark the unit as already scheduled.
//!
//! # Types
//!
//! - [`PropertyDelta`]: previous/current pair for one property
//! - [`PropertyChange`]: a changed property at a dotted path
//! - [`DeltaInfo`]: a change entry with the declared type
//! - [`ErasedValue`]: comparable, type-erased property value
//! - [`DeltaTracker`] / [`HasDelta`]: capabilities of generated delta types

mod support;

pub use support::{
    DeltaInfo, DeltaTracker, ErasedValue, HasDelta, PropertyChange, PropertyDelta,
};

/// Source text of the shared support unit.
pub const SUPPORT_SOURCE: &str = include_str!("support.rs");

#[cfg(test)]
mod tests;
