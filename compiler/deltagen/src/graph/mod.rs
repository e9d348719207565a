//! Descriptor graph assembly.
//!
//! The graph holds one node per tracked type, keyed by identity. Edges are
//! identities stored on properties, never embedded descriptors, so mutually
//! and self-referential models need no special handling: a descriptor is
//! built once, and a reference is a map lookup.
//!
//! Assembly is where whole-program rules apply:
//! - two candidates with one identity are both dropped (D0008)
//! - two types with one generated name are both dropped (D0009)
//! - a property whose core type is a node becomes a nested reference, if
//!   its owner deep-tracks
//!
//! Everything else, including references to unknown types, degrades to an
//! opaque property without error.

use std::collections::{BTreeMap, BTreeSet};

use rustc_hash::FxHashMap;

use deltagen_ir::{NestedRef, TrackedTypeDescriptor, TypeIdentity};

use crate::diagnostic::{Diagnostic, ErrorCode};
use crate::options::EmitOptions;

/// All tracked types of a compilation, resolved against each other.
///
/// # Salsa Compatibility
/// Has all required traits: Clone, Eq, `PartialEq`, Hash, Debug
#[derive(Clone, Default, Eq, PartialEq, Hash, Debug)]
pub struct DescriptorGraph {
    nodes: BTreeMap<TypeIdentity, TrackedTypeDescriptor>,
    diagnostics: Vec<Diagnostic>,
}

impl DescriptorGraph {
    /// Look up a node by identity.
    pub fn get(&self, identity: &TypeIdentity) -> Option<&TrackedTypeDescriptor> {
        self.nodes.get(identity)
    }

    /// Nodes in identity order.
    pub fn nodes(&self) -> impl Iterator<Item = &TrackedTypeDescriptor> {
        self.nodes.values()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Diagnostics raised by assembly itself.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

/// Assemble built descriptors into a graph.
///
/// Input order does not affect the result.
#[tracing::instrument(level = "debug", skip_all, fields(descriptors = descriptors.len()))]
pub fn assemble(descriptors: Vec<TrackedTypeDescriptor>, options: &EmitOptions) -> DescriptorGraph {
    let mut diagnostics = Vec::new();

    let mut by_identity: BTreeMap<TypeIdentity, Vec<TrackedTypeDescriptor>> = BTreeMap::new();
    for descriptor in descriptors {
        by_identity
            .entry(descriptor.identity.clone())
            .or_default()
            .push(descriptor);
    }

    let mut unique = Vec::with_capacity(by_identity.len());
    for (identity, mut group) in by_identity {
        if group.len() > 1 {
            diagnostics.push(
                Diagnostic::error(ErrorCode::D0008)
                    .with_message(format!(
                        "`{identity}` is declared {} times with the tracking marker",
                        group.len()
                    ))
                    .with_subject(identity.to_string())
                    .with_note("no delta type is generated for any of them"),
            );
            continue;
        }
        unique.extend(group.pop());
    }

    let mut by_generated_name: BTreeMap<String, Vec<TypeIdentity>> = BTreeMap::new();
    for descriptor in &unique {
        by_generated_name
            .entry(descriptor.generated_name.clone())
            .or_default()
            .push(descriptor.identity.clone());
    }
    let mut colliding = BTreeSet::new();
    for (generated_name, identities) in &by_generated_name {
        if let [first, _, ..] = identities.as_slice() {
            let listed: Vec<String> = identities.iter().map(|id| format!("`{id}`")).collect();
            diagnostics.push(
                Diagnostic::error(ErrorCode::D0009)
                    .with_message(format!(
                        "generated name `{generated_name}` is claimed by {}",
                        listed.join(", ")
                    ))
                    .with_subject(first.to_string())
                    .with_note("generated units share one output directory; rename a type or set a different suffix"),
            );
            colliding.extend(identities.iter().cloned());
        }
    }
    unique.retain(|descriptor| !colliding.contains(&descriptor.identity));

    let delta_paths: FxHashMap<TypeIdentity, String> = unique
        .iter()
        .map(|descriptor| {
            (
                descriptor.identity.clone(),
                delta_type_path(descriptor, options),
            )
        })
        .collect();

    let mut nodes = BTreeMap::new();
    for mut descriptor in unique {
        if descriptor.config.deep_tracking {
            link_nested(&mut descriptor, &delta_paths);
        }
        nodes.insert(descriptor.identity.clone(), descriptor);
    }

    tracing::debug!(nodes = nodes.len(), "assembled descriptor graph");

    DescriptorGraph { nodes, diagnostics }
}

/// Path of a node's generated delta type, as seen from any module.
pub fn delta_type_path(descriptor: &TrackedTypeDescriptor, options: &EmitOptions) -> String {
    format!(
        "{}::{}::{}",
        descriptor.module_path(),
        options.deltas_module,
        descriptor.generated_name
    )
}

fn link_nested(descriptor: &mut TrackedTypeDescriptor, delta_paths: &FxHashMap<TypeIdentity, String>) {
    let mut references = BTreeSet::new();
    for property in &mut descriptor.properties {
        let target = property
            .declared_type
            .candidates()
            .find_map(|identity| delta_paths.get_key_value(identity));
        property.nested = target.map(|(identity, delta_path)| {
            references.insert(identity.clone());
            NestedRef {
                identity: identity.clone(),
                delta_path: delta_path.clone(),
            }
        });
    }
    descriptor.nested_references = references;
}
