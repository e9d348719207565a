//! Tracked model fixtures.
//!
//! Every model here is compiled together with the delta types the build
//! script generates for it, so the integration tests exercise generated code
//! the way a downstream crate would.

pub mod delta_support {
    include!(concat!(env!("OUT_DIR"), "/DeltaSupport.g.rs"));
}

pub mod catalog;
pub mod graph;
pub mod settings;
