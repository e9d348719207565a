//! Per-module manifests.
//!
//! A manifest is what the user mounts inside a model module:
//!
//! ```text
//! pub mod deltas {
//!     include!(concat!(env!("OUT_DIR"), "/models.deltas.rs"));
//! }
//! ```
//!
//! It glob-imports the model module, so generated units can name property
//! types exactly as written there, and then includes each delta unit of
//! that module in identity order.

use deltagen_ir::naming::module_key;

use super::writer::CodeWriter;
use crate::options::EmitOptions;
use crate::output::{OutputUnit, UnitKind};

/// File name of a module's manifest.
pub fn manifest_file_name(module_path: &str) -> String {
    format!("{}.deltas.rs", module_key(module_path))
}

/// Emit the manifest for `module_path` including `unit_files`.
///
/// `unit_files` must already be in the order they should be included.
pub fn emit_manifest(module_path: &str, unit_files: &[String], options: &EmitOptions) -> OutputUnit {
    let file_name = manifest_file_name(module_path);
    let mut w = CodeWriter::new();

    w.line(&format!(
        "// @generated by deltagen for module `{module_path}`. Do not edit."
    ));
    w.line("//");
    w.line(&format!("// Mount inside `{module_path}` as:"));
    w.line(&format!(
        "//     pub mod {} {{ include!({}); }}",
        options.deltas_module,
        options.include_argument(&file_name)
    ));
    w.blank();
    w.line("#[allow(unused_imports)]");
    w.line("use super::*;");
    w.blank();
    for unit in unit_files {
        w.line(&format!("include!({});", options.include_argument(unit)));
    }

    OutputUnit {
        file_name,
        kind: UnitKind::Manifest,
        subject: module_path.to_string(),
        text: w.finish(),
    }
}
