//! deltagen - Build-Time Delta Type Generation
//!
//! For every struct marked `#[derive(TrackDelta)]`, deltagen generates a
//! delta type that compares two instances field by field: lazily, with
//! nested tracked types expanded into nested deltas, and with a flat,
//! path-addressed listing of what changed.
//!
//! # Architecture
//!
//! ```text
//! SourceUnit (input)
//!     │
//!     ▼
//! collected() ──► Candidate         (marked declarations, normalized)
//!     │
//!     ▼
//! descriptor() ──► TrackedTypeDescriptor
//!     │
//!     ▼
//! descriptor_graph() ──► DescriptorGraph   (identity-keyed, cycle-safe)
//!     │
//!     ▼
//! emitted_unit() ──► OutputUnit      (deterministic Rust source)
//! ```
//!
//! Each arrow is a Salsa query with automatic caching and invalidation.
//! `Generator` drives the pipeline from a build script; `Session` keeps it
//! alive across edits for long-running hosts.
//!
//! # Mounting the output
//!
//! ```text
//! // src/lib.rs
//! pub mod delta_support {
//!     include!(concat!(env!("OUT_DIR"), "/DeltaSupport.g.rs"));
//! }
//!
//! // src/models.rs
//! pub mod deltas {
//!     include!(concat!(env!("OUT_DIR"), "/models.deltas.rs"));
//! }
//! ```

use std::sync::Once;

pub mod build;
pub mod collect;
pub mod db;
pub mod diagnostic;
pub mod emit;
pub mod error;
pub mod generator;
pub mod graph;
pub mod input;
pub mod options;
pub mod output;
pub mod query;
pub mod resolve;
pub mod session;

pub use deltagen_ir::{TrackedTypeDescriptor, TrackingConfig, TypeIdentity};
pub use diagnostic::{Diagnostic, ErrorCode, Severity};
pub use error::GenerateError;
pub use generator::{GenerationReport, Generator};
pub use options::{EmitOptions, IncludeRoot};
pub use output::{Generation, OutputUnit, UnitKind};
pub use session::Session;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `RUST_LOG=deltagen=debug` or `RUST_LOG=deltagen=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true).with_writer(std::io::stderr))
                .with(filter)
                .init();
        }
    });
}
