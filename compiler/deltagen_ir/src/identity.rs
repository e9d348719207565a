//! Module-qualified type identity.
//!
//! An identity is the path a type is reachable at from the crate root,
//! e.g. `crate::models::User`. It is the descriptor graph's node key.

use std::fmt;

/// Stable, module-qualified identity of a declared type.
///
/// # Salsa Compatibility
/// Has all required traits: Clone, Eq, `PartialEq`, Ord, `PartialOrd`, Hash, Debug
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct TypeIdentity(String);

impl TypeIdentity {
    /// Identity of `name` declared in `module_path`.
    pub fn new(module_path: &str, name: &str) -> Self {
        TypeIdentity(format!("{module_path}::{name}"))
    }

    /// Wrap an already-qualified path.
    pub fn from_path(path: impl Into<String>) -> Self {
        TypeIdentity(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The last path segment (the type's own name).
    pub fn name(&self) -> &str {
        match self.0.rfind("::") {
            Some(at) => &self.0[at + 2..],
            None => &self.0,
        }
    }

    /// Everything before the last path segment.
    ///
    /// Returns an empty string for single-segment identities.
    pub fn module_path(&self) -> &str {
        match self.0.rfind("::") {
            Some(at) => &self.0[..at],
            None => "",
        }
    }
}

impl fmt::Display for TypeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
