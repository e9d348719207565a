//! Tracked type descriptors.
//!
//! A descriptor is the semantic model of one annotated type, detached from
//! the syntax tree it was built from. Nested tracked types are referenced by
//! identity only; a descriptor never embeds another descriptor, so cyclic
//! models are represented without any special casing.

use std::collections::BTreeSet;

use crate::{TrackingConfig, TypeIdentity};

/// How the model type declares its fields.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeShape {
    /// `struct S { a: A }`
    Named,
    /// `struct S(A);`
    Tuple,
    /// `struct S;`
    Unit,
}

/// Pointer/nullability wrapper around a property's core type.
///
/// Only these wrappers are looked through when deciding whether a property
/// refers to another tracked type; every other generic is an opaque value.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Wrapper {
    /// `T`
    Plain,
    /// `Option<T>`
    Optional,
    /// `Box<T>`
    Boxed,
    /// `Option<Box<T>>`
    OptionalBoxed,
}

/// The declared type of a property.
///
/// # Salsa Compatibility
/// Has all required traits: Clone, Eq, `PartialEq`, Hash, Debug
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct DeclaredType {
    /// Type text valid inside the generated module (normalized tokens).
    pub spelled: String,
    pub wrapper: Wrapper,
    /// Resolved identity of the core path type, when it is a path type.
    pub core: Option<TypeIdentity>,
    /// Identities the core type could name through glob imports, in import
    /// order. Consulted only when `core` is not a tracked type.
    pub glob_candidates: Vec<TypeIdentity>,
}

impl DeclaredType {
    /// Every identity the core type may refer to, most specific first.
    pub fn candidates(&self) -> impl Iterator<Item = &TypeIdentity> {
        self.core.iter().chain(&self.glob_candidates)
    }
}

/// Visibility given to generated items.
///
/// Generated items live in a child module of the model's module, so a
/// private model maps to `pub(super)`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum DeltaVisibility {
    Public,
    Crate,
    Parent,
}

impl DeltaVisibility {
    /// Rust spelling, without trailing space.
    pub fn as_str(self) -> &'static str {
        match self {
            DeltaVisibility::Public => "pub",
            DeltaVisibility::Crate => "pub(crate)",
            DeltaVisibility::Parent => "pub(super)",
        }
    }
}

/// A reference from a property to another tracked type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct NestedRef {
    pub identity: TypeIdentity,
    /// Path to the nested type's generated delta type.
    pub delta_path: String,
}

/// One trackable property of a model type.
///
/// # Salsa Compatibility
/// Has all required traits: Clone, Eq, `PartialEq`, Hash, Debug
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct PropertyDescriptor {
    /// Segment used in change paths (field name without `r#`, or tuple index).
    pub name: String,
    /// Field access token on the model (`name`, `r#type`, `0`).
    pub field: String,
    /// Generated slot and accessor identifier.
    pub member: String,
    pub declared_type: DeclaredType,
    /// Set during graph assembly when the core type is tracked and the owner
    /// deep-tracks.
    pub nested: Option<NestedRef>,
}

impl PropertyDescriptor {
    pub fn is_nested_tracked(&self) -> bool {
        self.nested.is_some()
    }
}

/// Semantic model of one tracked type.
///
/// # Salsa Compatibility
/// Has all required traits: Clone, Eq, `PartialEq`, Hash, Debug
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct TrackedTypeDescriptor {
    pub identity: TypeIdentity,
    /// `{type_name}{suffix}`.
    pub generated_name: String,
    pub config: TrackingConfig,
    pub visibility: DeltaVisibility,
    pub shape: TypeShape,
    /// Properties in declaration order.
    pub properties: Vec<PropertyDescriptor>,
    /// Identities of tracked types reachable through nested properties.
    ///
    /// May contain `identity` itself. Filled in by graph assembly.
    pub nested_references: BTreeSet<TypeIdentity>,
}

impl TrackedTypeDescriptor {
    /// The model type's own name.
    pub fn type_name(&self) -> &str {
        self.identity.name()
    }

    /// The module the model type is declared in.
    pub fn module_path(&self) -> &str {
        self.identity.module_path()
    }

    pub fn has_nested_properties(&self) -> bool {
        self.properties.iter().any(PropertyDescriptor::is_nested_tracked)
    }
}
