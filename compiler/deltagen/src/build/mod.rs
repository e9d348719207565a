//! Descriptor building.
//!
//! Turns one candidate into a `TrackedTypeDescriptor`. Each candidate is
//! built in isolation; nested references are left unresolved here and
//! filled in by graph assembly, which is the only stage that sees every
//! tracked type at once.

use std::collections::BTreeSet;

use rustc_hash::FxHashMap;

use deltagen_ir::naming::{member_name, path_segment, unreserved_member};
use deltagen_ir::{
    is_ignored_field, parse_marker_config, ConfigIssue, DeltaVisibility, PropertyDescriptor,
    TrackedTypeDescriptor, TypeShape,
};
use syn::{Fields, ItemStruct, Visibility};

use crate::collect::{Candidate, CandidateKind};
use crate::diagnostic::{Diagnostic, ErrorCode};
use crate::resolve::Resolver;

/// Result of building one candidate.
///
/// `descriptor` is `None` when any error was reported; warnings may
/// accompany a successful build.
///
/// # Salsa Compatibility
/// Has all required traits: Clone, Eq, `PartialEq`, Hash, Debug
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct BuildOutcome {
    pub descriptor: Option<TrackedTypeDescriptor>,
    pub diagnostics: Vec<Diagnostic>,
}

impl BuildOutcome {
    fn failed(diagnostics: Vec<Diagnostic>) -> Self {
        BuildOutcome {
            descriptor: None,
            diagnostics,
        }
    }
}

/// Build the descriptor for `candidate`.
#[tracing::instrument(level = "debug", skip_all, fields(identity = %candidate.identity))]
pub fn build_descriptor(candidate: &Candidate) -> BuildOutcome {
    let subject = candidate.identity.to_string();

    if candidate.kind != CandidateKind::Struct {
        return BuildOutcome::failed(vec![Diagnostic::error(ErrorCode::D0002)
            .with_message(format!(
                "`{}` is {} {}; only structs can be tracked",
                candidate.identity.name(),
                article(candidate.kind),
                candidate.kind.as_str()
            ))
            .with_subject(subject)]);
    }

    let item: ItemStruct = match syn::parse_str(&candidate.item) {
        Ok(item) => item,
        Err(err) => {
            return BuildOutcome::failed(vec![Diagnostic::error(ErrorCode::D0001)
                .with_message(format!("failed to re-read declaration: {err}"))
                .with_subject(subject)]);
        }
    };

    if !item.generics.params.is_empty() {
        return BuildOutcome::failed(vec![Diagnostic::error(ErrorCode::D0003)
            .with_message(format!(
                "`{}` has generic or lifetime parameters",
                candidate.identity.name()
            ))
            .with_subject(subject)
            .with_note("delta types are generated for concrete types only")]);
    }

    let mut diagnostics = Vec::new();
    let (config, issues) = parse_marker_config(&item.attrs);
    diagnostics.extend(issues.into_iter().map(|issue| config_warning(&subject, issue)));

    let resolver = Resolver {
        module_path: candidate.module_path(),
        self_identity: &candidate.identity,
        scope: &candidate.scope,
    };

    let shape = match &item.fields {
        Fields::Named(_) => TypeShape::Named,
        Fields::Unnamed(_) => TypeShape::Tuple,
        Fields::Unit => TypeShape::Unit,
    };

    let mut failed = false;
    let mut properties = Vec::new();
    let mut members: FxHashMap<String, String> = FxHashMap::default();

    for (index, field) in item.fields.iter().enumerate() {
        let (ignored, issues) = is_ignored_field(&field.attrs);
        diagnostics.extend(issues.into_iter().map(|issue| config_warning(&subject, issue)));
        if ignored || !is_exposed(&field.vis) {
            continue;
        }

        let raw = field
            .ident
            .as_ref()
            .map_or_else(|| index.to_string(), ToString::to_string);
        let name = path_segment(&raw);
        let mut member = member_name(&raw);
        if let Some(renamed) = unreserved_member(&member) {
            diagnostics.push(
                Diagnostic::warning(ErrorCode::D0007)
                    .with_message(format!(
                        "property `{name}` clashes with a generated member; its accessor is `{renamed}`"
                    ))
                    .with_subject(subject.clone())
                    .with_note("rename the field or mark it `#[delta(ignore)]` to keep the default accessor name"),
            );
            member = renamed;
        }

        if let Some(first) = members.get(&member) {
            failed = true;
            diagnostics.push(
                Diagnostic::error(ErrorCode::D0006)
                    .with_message(format!(
                        "properties `{first}` and `{name}` both map to member `{member}`"
                    ))
                    .with_subject(subject.clone()),
            );
            continue;
        }
        members.insert(member.clone(), name.clone());

        match resolver.declared_type(&field.ty) {
            Ok(declared_type) => properties.push(PropertyDescriptor {
                name,
                field: raw,
                member,
                declared_type,
                nested: None,
            }),
            Err(unresolvable) => {
                failed = true;
                diagnostics.push(
                    Diagnostic::error(ErrorCode::D0005)
                        .with_message(format!(
                            "type of property `{name}` refers to `{}`, which is above the crate root",
                            unresolvable.path
                        ))
                        .with_subject(subject.clone()),
                );
            }
        }
    }

    if failed {
        return BuildOutcome::failed(diagnostics);
    }

    tracing::debug!(properties = properties.len(), "built descriptor");

    let generated_name = config.generated_name(candidate.identity.name());
    BuildOutcome {
        descriptor: Some(TrackedTypeDescriptor {
            identity: candidate.identity.clone(),
            generated_name,
            config,
            visibility: delta_visibility(&item.vis),
            shape,
            properties,
            nested_references: BTreeSet::new(),
        }),
        diagnostics,
    }
}

/// Fields that take part in tracking: `pub` and `pub(crate)`.
fn is_exposed(vis: &Visibility) -> bool {
    match vis {
        Visibility::Public(_) => true,
        Visibility::Restricted(restricted) => {
            restricted.in_token.is_none() && restricted.path.is_ident("crate")
        }
        Visibility::Inherited => false,
    }
}

fn delta_visibility(vis: &Visibility) -> DeltaVisibility {
    match vis {
        Visibility::Public(_) => DeltaVisibility::Public,
        Visibility::Restricted(_) => DeltaVisibility::Crate,
        Visibility::Inherited => DeltaVisibility::Parent,
    }
}

fn config_warning(subject: &str, issue: ConfigIssue) -> Diagnostic {
    Diagnostic::warning(ErrorCode::D0004)
        .with_message(issue.message)
        .with_subject(subject)
}

fn article(kind: CandidateKind) -> &'static str {
    match kind {
        CandidateKind::Enum => "an",
        CandidateKind::Struct | CandidateKind::Union => "a",
    }
}
