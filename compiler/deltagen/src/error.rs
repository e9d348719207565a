//! Build-script errors.
//!
//! These are failures of the generator itself. Problems in the user's
//! tracked types are diagnostics, not errors, and never abort a run.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Generator result type
pub type Result<T> = std::result::Result<T, GenerateError>;

/// Errors that stop generation.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("OUT_DIR is not set; call `Generator::out_dir` or run from a build script")]
    MissingOutDir,

    #[error("invalid option `{option}`: {reason}")]
    InvalidOption { option: &'static str, reason: String },

    #[error("no crate root (lib.rs or main.rs) in {}", path.display())]
    MissingRoot { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
