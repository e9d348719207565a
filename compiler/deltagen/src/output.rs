//! Generation output.

use crate::diagnostic::Diagnostic;

/// What an output unit contains.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum UnitKind {
    /// Shared support types, emitted at most once.
    Support,
    /// One tracked type's delta type.
    Delta,
    /// A module's list of delta units to include.
    Manifest,
}

/// One generated source file.
///
/// # Salsa Compatibility
/// Has all required traits: Clone, Eq, `PartialEq`, Hash, Debug
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct OutputUnit {
    /// File name, unique within a generation.
    pub file_name: String,
    pub kind: UnitKind,
    /// Type identity or module path the unit was generated for.
    pub subject: String,
    pub text: String,
}

/// Everything one generation run produced.
///
/// Units are ordered: support first, then delta units by identity, then
/// manifests by module path.
#[derive(Clone, Default, Eq, PartialEq, Hash, Debug)]
pub struct Generation {
    pub units: Vec<OutputUnit>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Generation {
    /// Find a unit by file name.
    pub fn unit(&self, file_name: &str) -> Option<&OutputUnit> {
        self.units.iter().find(|unit| unit.file_name == file_name)
    }

    pub fn units_of(&self, kind: UnitKind) -> impl Iterator<Item = &OutputUnit> {
        self.units.iter().filter(move |unit| unit.kind == kind)
    }

    /// Check if any diagnostic is an error.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}
