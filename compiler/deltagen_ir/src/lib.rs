//! deltagen IR - Value-Equality Descriptor Types
//!
//! This crate contains the data that flows between the stages of the delta
//! generator:
//! - `TypeIdentity` for module-qualified type names
//! - `TrackingConfig` parsed from `#[delta(...)]` marker arguments
//! - `TrackedTypeDescriptor` / `PropertyDescriptor` for one tracked type
//! - Member naming rules for generated slots and accessors
//!
//! # Salsa Compatibility
//!
//! Every descriptor type has the traits required to be a query result:
//! - Clone: Required for Salsa storage
//! - Eq + `PartialEq`: Required for early cutoff
//! - Hash: Required for memoization keys
//! - Debug: Required for error messages
//!
//! Nothing here holds `syn` nodes or spans. Two builds of an unchanged
//! declaration produce equal descriptors.

mod config;
mod descriptor;
mod identity;
pub mod naming;

pub use config::{
    is_ignored_field, is_tracking_marker, parse_marker_config, ConfigIssue, IssueKind,
    TrackingConfig, DEFAULT_SUFFIX, HELPER_ATTRIBUTE, MARKER_NAME,
};
pub use descriptor::{
    DeclaredType, DeltaVisibility, NestedRef, PropertyDescriptor, TrackedTypeDescriptor, TypeShape, Wrapper,
};
pub use identity::TypeIdentity;
