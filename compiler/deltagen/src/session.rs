//! Incremental generation session.
//!
//! A session keeps the database between runs. Hosts that regenerate on
//! every edit (an IDE integration, a watch loop) hold one session and feed
//! it changed files; only the affected queries re-run.

use std::collections::BTreeMap;
use std::path::PathBuf;

use salsa::Setter;

use crate::db::GeneratorDb;
use crate::graph::DescriptorGraph;
use crate::input::{Compilation, SourceUnit};
use crate::options::EmitOptions;
use crate::output::Generation;
use crate::query;

/// Long-lived generation state.
pub struct Session {
    db: GeneratorDb,
    compilation: Compilation,
    units: BTreeMap<String, SourceUnit>,
}

impl Default for Session {
    fn default() -> Self {
        Session::new(EmitOptions::default())
    }
}

impl Session {
    pub fn new(options: EmitOptions) -> Self {
        let db = GeneratorDb::new();
        let compilation = Compilation::new(&db, Vec::new(), options);
        Session {
            db,
            compilation,
            units: BTreeMap::new(),
        }
    }

    /// Add or replace the source of `module_path`.
    ///
    /// Setting identical text is a no-op and invalidates nothing.
    pub fn set_source(
        &mut self,
        module_path: impl Into<String>,
        path: impl Into<PathBuf>,
        text: impl Into<String>,
    ) {
        let module_path = module_path.into();
        let path = path.into();
        let text = text.into();

        if let Some(&unit) = self.units.get(&module_path) {
            if unit.path(&self.db) != &path {
                unit.set_path(&mut self.db).to(path);
            }
            if unit.text(&self.db) != &text {
                tracing::debug!(module_path, "source changed");
                unit.set_text(&mut self.db).to(text);
            }
            return;
        }

        tracing::debug!(module_path, "source added");
        let unit = SourceUnit::new(&self.db, module_path.clone(), path, text);
        self.units.insert(module_path, unit);
        self.sync_units();
    }

    /// Forget the source of `module_path`. Returns whether it was known.
    pub fn remove_source(&mut self, module_path: &str) -> bool {
        if self.units.remove(module_path).is_none() {
            return false;
        }
        tracing::debug!(module_path, "source removed");
        self.sync_units();
        true
    }

    /// Module paths with a source, in order.
    pub fn modules(&self) -> impl Iterator<Item = &str> {
        self.units.keys().map(String::as_str)
    }

    pub fn options(&self) -> &EmitOptions {
        self.compilation.options(&self.db)
    }

    pub fn set_options(&mut self, options: EmitOptions) {
        if self.compilation.options(&self.db) != &options {
            self.compilation.set_options(&mut self.db).to(options);
        }
    }

    /// Run the pipeline, reusing everything unaffected since the last run.
    pub fn generate(&self) -> Generation {
        query::generated(&self.db, self.compilation)
    }

    /// The descriptor graph of the current sources.
    pub fn graph(&self) -> DescriptorGraph {
        query::descriptor_graph(&self.db, self.compilation)
    }

    #[cfg(test)]
    pub(crate) fn db(&self) -> &GeneratorDb {
        &self.db
    }

    fn sync_units(&mut self) {
        let units: Vec<SourceUnit> = self.units.values().copied().collect();
        self.compilation.set_units(&mut self.db).to(units);
    }
}
