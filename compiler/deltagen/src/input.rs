//! Salsa Inputs - User-provided data that can change
//!
//! Inputs are the leaves of the query graph. Editing a source unit's text
//! invalidates only the queries that read that unit.

use std::path::PathBuf;

use crate::options::EmitOptions;

/// One Rust source file of the user's crate.
#[salsa::input]
pub struct SourceUnit {
    /// Module path the file's items live in (`crate`, `crate::models`).
    #[return_ref]
    pub module_path: String,

    /// File path, for diagnostics.
    #[return_ref]
    pub path: PathBuf,

    /// Source text content.
    #[return_ref]
    pub text: String,
}

/// The whole generation input: every source unit plus options.
#[salsa::input]
pub struct Compilation {
    /// Units ordered by module path.
    #[return_ref]
    pub units: Vec<SourceUnit>,

    #[return_ref]
    pub options: EmitOptions,
}
