//! Deterministic emission.
//!
//! Three kinds of unit are produced:
//! - one delta unit per graph node (`UserDelta.g.rs`)
//! - one manifest per module with tracked types (`models.deltas.rs`)
//! - the shared support unit (`DeltaSupport.g.rs`), at most once
//!
//! Emission is a pure function of its inputs. Nothing here reads the clock,
//! the environment, or iteration order of a hash map.

mod delta;
mod manifest;
mod writer;

pub use delta::{delta_unit_file_name, emit_delta_unit};
pub use manifest::{emit_manifest, manifest_file_name};
pub use writer::CodeWriter;

use crate::output::{OutputUnit, UnitKind};

/// File name of the shared support unit.
pub const SUPPORT_UNIT_FILE: &str = "DeltaSupport.g.rs";

/// Emit the shared support unit.
///
/// The user mounts it at the configured support path, e.g.
/// `pub mod delta_support { include!(concat!(env!("OUT_DIR"), "/DeltaSupport.g.rs")); }`.
pub fn emit_support_unit() -> OutputUnit {
    let mut w = CodeWriter::with_capacity(deltagen_support::SUPPORT_SOURCE.len() + 128);
    w.line("// @generated by deltagen. Do not edit.");
    w.blank();
    for line in deltagen_support::SUPPORT_SOURCE.lines() {
        w.line(line);
    }
    OutputUnit {
        file_name: SUPPORT_UNIT_FILE.to_string(),
        kind: UnitKind::Support,
        subject: "support".to_string(),
        text: w.finish(),
    }
}
