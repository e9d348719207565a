//! Generation options.
//!
//! These are compilation-wide: they shape how emitted units refer to the
//! shared support types and how module manifests include per-type units.
//! Per-type options come from marker arguments instead.

use deltagen_ir::naming::is_keyword;

/// Default path the support unit is mounted at.
pub const DEFAULT_SUPPORT_PATH: &str = "crate::delta_support";

/// Default name of the per-module child module holding generated types.
pub const DEFAULT_DELTAS_MODULE: &str = "deltas";

/// How module manifests locate per-type units.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum IncludeRoot {
    /// `include!(concat!(env!("OUT_DIR"), "/X.g.rs"))`
    #[default]
    OutDir,
    /// `include!("<dir>/X.g.rs")` with a fixed directory.
    Directory(String),
}

/// Compilation-wide emission options.
///
/// # Salsa Compatibility
/// Has all required traits: Clone, Eq, `PartialEq`, Hash, Debug
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct EmitOptions {
    /// Module path generated code uses to reach the support types.
    pub support_path: String,
    /// Child module name each model module mounts its manifest under.
    pub deltas_module: String,
    /// The support unit has already been produced elsewhere; do not emit it.
    pub support_scheduled: bool,
    pub include_root: IncludeRoot,
}

impl Default for EmitOptions {
    fn default() -> Self {
        EmitOptions {
            support_path: DEFAULT_SUPPORT_PATH.to_string(),
            deltas_module: DEFAULT_DELTAS_MODULE.to_string(),
            support_scheduled: false,
            include_root: IncludeRoot::OutDir,
        }
    }
}

/// An option value that cannot be used.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct InvalidOption {
    pub option: &'static str,
    pub reason: String,
}

impl EmitOptions {
    /// Check that the options can be spliced into generated code.
    pub fn validate(&self) -> Result<(), InvalidOption> {
        let path = self.support_path.strip_prefix("::").unwrap_or(&self.support_path);
        if path.is_empty() || !path.split("::").all(is_path_segment) {
            return Err(InvalidOption {
                option: "support_path",
                reason: format!("`{}` is not a module path", self.support_path),
            });
        }
        if !is_plain_identifier(&self.deltas_module) {
            return Err(InvalidOption {
                option: "deltas_module",
                reason: format!("`{}` is not a plain identifier", self.deltas_module),
            });
        }
        if let IncludeRoot::Directory(dir) = &self.include_root {
            if dir.is_empty() {
                return Err(InvalidOption {
                    option: "include_root",
                    reason: "directory is empty".to_string(),
                });
            }
        }
        Ok(())
    }

    /// The `include!` argument for a unit file named `file_name`.
    pub fn include_argument(&self, file_name: &str) -> String {
        match &self.include_root {
            IncludeRoot::OutDir => format!("concat!(env!(\"OUT_DIR\"), \"/{file_name}\")"),
            IncludeRoot::Directory(dir) => {
                let dir = dir.trim_end_matches(['/', '\\']);
                format!("{:?}", format!("{dir}/{file_name}"))
            }
        }
    }
}

fn is_path_segment(segment: &str) -> bool {
    matches!(segment, "crate" | "self" | "super") || is_plain_identifier(segment)
}

fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let starts_well = chars
        .next()
        .is_some_and(|c| c == '_' || c.is_alphabetic());
    starts_well && chars.all(|c| c == '_' || c.is_alphanumeric()) && name != "_" && !is_keyword(name)
}
