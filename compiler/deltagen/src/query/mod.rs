//! Salsa Queries - Computed values that are cached
//!
//! The pipeline as a query graph:
//!
//! ```text
//! SourceUnit ──collected──▶ Candidate ──descriptor──▶ BuildOutcome
//!                                                        │
//! Compilation ──────────────descriptor_graph◀────────────┘
//!      │                          │
//!      │                node ──emitted_unit──▶ OutputUnit
//!      └──support_unit──▶ OutputUnit
//!                 generated ◀── all of the above
//! ```
//!
//! # Early Cutoff
//!
//! Candidates hold normalized token text, so a whitespace or comment edit
//! re-runs `collected` for the edited file and nothing else. Descriptor and
//! emission queries are keyed by interned values: a type whose candidate is
//! unchanged keeps its descriptor, and a node that is unchanged keeps its
//! emitted text, whatever else changed in the compilation.

use std::collections::BTreeMap;

use deltagen_ir::TrackedTypeDescriptor;

use crate::build::{build_descriptor, BuildOutcome};
use crate::collect::{collect_file, Candidate, Collected};
use crate::db::Db;
use crate::emit::{emit_delta_unit, emit_manifest, emit_support_unit};
use crate::graph::{assemble, DescriptorGraph};
use crate::input::{Compilation, SourceUnit};
use crate::options::EmitOptions;
use crate::output::{Generation, OutputUnit};

#[cfg(test)]
mod tests;

/// Collect the marked declarations of one source unit.
///
/// # Caching Behavior
///
/// - Re-runs only when the unit's text or module path changes
/// - Equal results (e.g. after a comment edit) cut off everything downstream
#[salsa::tracked]
pub fn collected(db: &dyn Db, unit: SourceUnit) -> Collected {
    let label = unit.path(db).display().to_string();
    collect_file(unit.module_path(db), &label, unit.text(db))
}

/// Interned candidate, the key of `descriptor`.
#[salsa::interned]
pub struct CandidateKey<'db> {
    #[return_ref]
    pub candidate: Candidate,
}

/// Build the descriptor of one candidate.
///
/// Keyed by the candidate's value, not its position: moving a declaration
/// to another file or reordering files reuses the result.
#[salsa::tracked]
pub fn descriptor<'db>(db: &'db dyn Db, key: CandidateKey<'db>) -> BuildOutcome {
    build_descriptor(key.candidate(db))
}

/// Assemble every successfully built descriptor of the compilation.
#[salsa::tracked]
pub fn descriptor_graph(db: &dyn Db, compilation: Compilation) -> DescriptorGraph {
    let mut descriptors = Vec::new();
    for unit in compilation.units(db) {
        for candidate in collected(db, *unit).candidates {
            let outcome = descriptor(db, CandidateKey::new(db, candidate));
            descriptors.extend(outcome.descriptor);
        }
    }
    assemble(descriptors, compilation.options(db))
}

/// Interned graph node plus options, the key of `emitted_unit`.
#[salsa::interned]
pub struct EmitKey<'db> {
    #[return_ref]
    pub node: TrackedTypeDescriptor,

    #[return_ref]
    pub options: EmitOptions,
}

/// Emit the delta unit of one node.
#[salsa::tracked]
pub fn emitted_unit<'db>(db: &'db dyn Db, key: EmitKey<'db>) -> OutputUnit {
    emit_delta_unit(key.node(db), key.options(db))
}

/// The shared support unit, unless it is already scheduled elsewhere.
#[salsa::tracked]
pub fn support_unit(db: &dyn Db, compilation: Compilation) -> Option<OutputUnit> {
    if compilation.options(db).support_scheduled {
        None
    } else {
        Some(emit_support_unit())
    }
}

/// Run the whole pipeline.
///
/// Every module with at least one candidate gets a manifest, even when all
/// of its candidates failed, so the user's `include!` keeps resolving.
#[salsa::tracked]
pub fn generated(db: &dyn Db, compilation: Compilation) -> Generation {
    let options = compilation.options(db);
    let mut diagnostics = Vec::new();
    let mut modules: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for unit in compilation.units(db) {
        let found = collected(db, *unit);
        diagnostics.extend(found.diagnostics);
        for candidate in found.candidates {
            modules.entry(candidate.module_path().to_string()).or_default();
            let outcome = descriptor(db, CandidateKey::new(db, candidate));
            diagnostics.extend(outcome.diagnostics);
        }
    }

    let graph = descriptor_graph(db, compilation);
    diagnostics.extend(graph.diagnostics().iter().cloned());

    let mut units = Vec::with_capacity(graph.len() + modules.len() + 1);
    units.extend(support_unit(db, compilation));
    for node in graph.nodes() {
        let unit = emitted_unit(db, EmitKey::new(db, node.clone(), options.clone()));
        modules
            .entry(node.module_path().to_string())
            .or_default()
            .push(unit.file_name.clone());
        units.push(unit);
    }
    for (module_path, files) in &modules {
        units.push(emit_manifest(module_path, files, options));
    }

    tracing::debug!(
        units = units.len(),
        diagnostics = diagnostics.len(),
        "generation finished"
    );

    Generation { units, diagnostics }
}
