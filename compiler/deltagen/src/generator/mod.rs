//! Build-script entry point.
//!
//! ```text
//! // build.rs
//! fn main() {
//!     deltagen::Generator::new()
//!         .source_root("src")
//!         .generate()
//!         .unwrap_or_else(|err| panic!("delta generation failed: {err}"));
//! }
//! ```
//!
//! Generated files land in `OUT_DIR`. Files whose content is unchanged are
//! not rewritten, so their modification time does not trigger rebuilds.

mod discovery;

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub use discovery::{discover_sources, SourceFile};

use crate::diagnostic::Diagnostic;
use crate::error::{GenerateError, Result};
use crate::options::{EmitOptions, IncludeRoot};
use crate::session::Session;

/// Configures and runs one generation from a build script.
#[derive(Clone, Debug)]
pub struct Generator {
    roots: Vec<PathBuf>,
    files: Vec<SourceFile>,
    out_dir: Option<PathBuf>,
    options: EmitOptions,
    rerun_if_changed: bool,
    cargo_warnings: bool,
}

impl Default for Generator {
    fn default() -> Self {
        Generator {
            roots: Vec::new(),
            files: Vec::new(),
            out_dir: None,
            options: EmitOptions::default(),
            rerun_if_changed: true,
            cargo_warnings: true,
        }
    }
}

/// What a generation run did.
#[derive(Clone, Debug, Default)]
pub struct GenerationReport {
    /// Files created or rewritten.
    pub written: Vec<PathBuf>,
    /// Files left alone because their content was already current.
    pub unchanged: Vec<PathBuf>,
    pub diagnostics: Vec<Diagnostic>,
}

impl GenerationReport {
    /// Check if any diagnostic is an error.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

impl Generator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discover every module file under `root` (typically `src`).
    #[must_use]
    pub fn source_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.roots.push(root.into());
        self
    }

    /// Add a single file whose items live in `module_path`.
    #[must_use]
    pub fn source_file(mut self, module_path: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.files.push(SourceFile {
            module_path: module_path.into(),
            path: path.into(),
        });
        self
    }

    /// Write output here instead of `$OUT_DIR`.
    #[must_use]
    pub fn out_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.out_dir = Some(dir.into());
        self
    }

    /// Module path the support unit is mounted at (default `crate::delta_support`).
    #[must_use]
    pub fn support_path(mut self, path: impl Into<String>) -> Self {
        self.options.support_path = path.into();
        self
    }

    /// Child module name the manifests are mounted under (default `deltas`).
    #[must_use]
    pub fn deltas_module(mut self, name: impl Into<String>) -> Self {
        self.options.deltas_module = name.into();
        self
    }

    /// Skip the support unit; another generation already provides it.
    #[must_use]
    pub fn support_scheduled(mut self, scheduled: bool) -> Self {
        self.options.support_scheduled = scheduled;
        self
    }

    #[must_use]
    pub fn include_root(mut self, root: IncludeRoot) -> Self {
        self.options.include_root = root;
        self
    }

    /// Print `cargo:rerun-if-changed` for every source (default on).
    #[must_use]
    pub fn emit_rerun_if_changed(mut self, enabled: bool) -> Self {
        self.rerun_if_changed = enabled;
        self
    }

    /// Print diagnostics as `cargo:warning` lines (default on).
    #[must_use]
    pub fn cargo_warnings(mut self, enabled: bool) -> Self {
        self.cargo_warnings = enabled;
        self
    }

    /// Run the generation.
    ///
    /// Diagnostics never make this fail; check `GenerationReport::has_errors`
    /// to turn them into a build failure.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn generate(self) -> Result<GenerationReport> {
        crate::init_tracing();

        self.options
            .validate()
            .map_err(|invalid| GenerateError::InvalidOption {
                option: invalid.option,
                reason: invalid.reason,
            })?;

        let out_dir = match self.out_dir {
            Some(dir) => dir,
            None => env::var_os("OUT_DIR")
                .map(PathBuf::from)
                .ok_or(GenerateError::MissingOutDir)?,
        };

        let mut sources = Vec::new();
        for root in &self.roots {
            if self.rerun_if_changed {
                println!("cargo:rerun-if-changed={}", root.display());
            }
            sources.extend(discover_sources(root)?);
        }
        sources.extend(self.files);

        let mut session = Session::new(self.options);
        for source in sources {
            let text = fs::read_to_string(&source.path).map_err(|err| GenerateError::Read {
                path: source.path.clone(),
                source: err,
            })?;
            if self.rerun_if_changed {
                println!("cargo:rerun-if-changed={}", source.path.display());
            }
            session.set_source(source.module_path, source.path, text);
        }

        let generation = session.generate();
        tracing::info!(
            units = generation.units.len(),
            diagnostics = generation.diagnostics.len(),
            "generated delta units"
        );

        fs::create_dir_all(&out_dir).map_err(|source| GenerateError::Write {
            path: out_dir.clone(),
            source,
        })?;

        let mut report = GenerationReport::default();
        for unit in &generation.units {
            let path = out_dir.join(&unit.file_name);
            if write_if_changed(&path, &unit.text)? {
                report.written.push(path);
            } else {
                report.unchanged.push(path);
            }
        }

        if self.cargo_warnings {
            for diagnostic in &generation.diagnostics {
                println!("cargo:warning={}", diagnostic.to_single_line());
            }
        }
        report.diagnostics = generation.diagnostics;
        Ok(report)
    }
}

/// Write `text` to `path` unless it already holds exactly that.
///
/// Returns whether the file was written.
fn write_if_changed(path: &Path, text: &str) -> Result<bool> {
    if fs::read_to_string(path).is_ok_and(|existing| existing == text) {
        return Ok(false);
    }
    fs::write(path, text).map_err(|source| GenerateError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(true)
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
