//! Tracking marker configuration.
//!
//! A tracked type carries `#[derive(TrackDelta)]` and optionally
//! `#[delta(suffix = "...", deep_tracking = bool, convenience_functions = bool)]`.
//! Fields opt out with `#[delta(ignore)]`.
//!
//! Parsing is lenient: every problem is returned as a `ConfigIssue` next to a
//! configuration that has the offending value reset to its default. The
//! derive turns the hard issues into compile errors; the generator reports
//! all of them as warnings and keeps going.

use proc_macro2::Span;
use syn::punctuated::Punctuated;
use syn::{Attribute, Lit, Token};

/// Derive name that marks a type for delta generation.
pub const MARKER_NAME: &str = "TrackDelta";

/// Helper attribute carrying marker arguments.
pub const HELPER_ATTRIBUTE: &str = "delta";

/// Suffix appended to the type name when none is configured.
pub const DEFAULT_SUFFIX: &str = "Delta";

/// Per-type generation options.
///
/// # Salsa Compatibility
/// Has all required traits: Clone, Eq, `PartialEq`, Hash, Debug
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct TrackingConfig {
    /// Appended to the type name to form the generated delta type's name.
    pub suffix: String,
    /// Expand properties whose type is itself tracked into nested deltas.
    pub deep_tracking: bool,
    /// Emit the `delta_to` / `delta_from` extension trait.
    pub convenience_functions: bool,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        TrackingConfig {
            suffix: DEFAULT_SUFFIX.to_string(),
            deep_tracking: true,
            convenience_functions: true,
        }
    }
}

impl TrackingConfig {
    /// The generated delta type name for `type_name`.
    pub fn generated_name(&self, type_name: &str) -> String {
        format!("{type_name}{}", self.suffix)
    }
}

/// What went wrong while reading a marker argument.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum IssueKind {
    /// Argument name is not recognised.
    UnknownKey,
    /// Argument has a literal of the wrong kind.
    InvalidValue,
    /// `suffix = ""`.
    EmptySuffix,
    /// Suffix would not form a valid identifier.
    InvalidSuffix,
    /// The attribute is not a `key = value` list.
    Malformed,
}

impl IssueKind {
    /// Issues the derive rejects outright instead of correcting.
    ///
    /// A wrong value for a known argument has a default to fall back to;
    /// an unknown argument or a malformed attribute does not.
    pub fn is_hard(self) -> bool {
        matches!(
            self,
            IssueKind::UnknownKey | IssueKind::Malformed
        )
    }
}

/// A problem found in marker arguments.
#[derive(Clone, Debug)]
pub struct ConfigIssue {
    pub kind: IssueKind,
    pub message: String,
    pub span: Span,
}

impl ConfigIssue {
    fn new(kind: IssueKind, span: Span, message: impl Into<String>) -> Self {
        ConfigIssue {
            kind,
            message: message.into(),
            span,
        }
    }
}

/// Check whether an attribute is a derive list containing the tracking marker.
///
/// Any path ending in `TrackDelta` counts, so `deltagen_macros::TrackDelta`
/// is recognised as well.
pub fn is_tracking_marker(attr: &Attribute) -> bool {
    if !attr.path().is_ident("derive") {
        return false;
    }
    attr.parse_args_with(Punctuated::<syn::Path, Token![,]>::parse_terminated)
        .map(|paths| {
            paths
                .iter()
                .any(|path| path.segments.last().is_some_and(|s| s.ident == MARKER_NAME))
        })
        .unwrap_or(false)
}

/// Read the type-level `#[delta(...)]` attributes.
///
/// Multiple `delta` attributes are merged in order; later keys win.
pub fn parse_marker_config(attrs: &[Attribute]) -> (TrackingConfig, Vec<ConfigIssue>) {
    let mut config = TrackingConfig::default();
    let mut issues = Vec::new();

    for attr in attrs.iter().filter(|a| a.path().is_ident(HELPER_ATTRIBUTE)) {
        let parsed = attr.parse_nested_meta(|meta| {
            let span = meta.path.get_ident().map_or_else(Span::call_site, syn::Ident::span);
            let key = meta
                .path
                .get_ident()
                .map(ToString::to_string)
                .unwrap_or_default();

            match key.as_str() {
                "suffix" => match read_value(&meta)? {
                    Some(Lit::Str(lit)) => {
                        let value = lit.value();
                        if value.is_empty() {
                            issues.push(ConfigIssue::new(
                                IssueKind::EmptySuffix,
                                lit.span(),
                                format!("empty suffix; using `{DEFAULT_SUFFIX}`"),
                            ));
                        } else if !is_identifier_fragment(&value) {
                            issues.push(ConfigIssue::new(
                                IssueKind::InvalidSuffix,
                                lit.span(),
                                format!(
                                    "suffix `{value}` is not an identifier fragment; using `{DEFAULT_SUFFIX}`"
                                ),
                            ));
                        } else {
                            config.suffix = value;
                        }
                    }
                    _ => issues.push(ConfigIssue::new(
                        IssueKind::InvalidValue,
                        span,
                        format!("`suffix` expects a string literal; using `{DEFAULT_SUFFIX}`"),
                    )),
                },
                "deep_tracking" | "convenience_functions" => {
                    let value = match read_value(&meta)? {
                        // A bare flag means `true`.
                        None => Some(true),
                        Some(Lit::Bool(lit)) => Some(lit.value),
                        Some(_) => None,
                    };
                    match value {
                        Some(flag) if key == "deep_tracking" => config.deep_tracking = flag,
                        Some(flag) => config.convenience_functions = flag,
                        None => issues.push(ConfigIssue::new(
                            IssueKind::InvalidValue,
                            span,
                            format!("`{key}` expects `true` or `false`; using `true`"),
                        )),
                    }
                }
                _ => {
                    // Consume the value so the remaining arguments still parse.
                    read_value(&meta)?;
                    issues.push(ConfigIssue::new(
                        IssueKind::UnknownKey,
                        span,
                        format!("unknown delta argument `{key}`"),
                    ));
                }
            }
            Ok(())
        });

        if let Err(err) = parsed {
            issues.push(ConfigIssue::new(
                IssueKind::Malformed,
                err.span(),
                format!("malformed `#[delta(...)]` attribute: {err}"),
            ));
        }
    }

    (config, issues)
}

/// Check a field's attributes for `#[delta(ignore)]`.
///
/// Unrecognised field arguments are returned as issues; the field is kept.
pub fn is_ignored_field(attrs: &[Attribute]) -> (bool, Vec<ConfigIssue>) {
    let mut ignored = false;
    let mut issues = Vec::new();

    for attr in attrs.iter().filter(|a| a.path().is_ident(HELPER_ATTRIBUTE)) {
        let parsed = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("ignore") {
                ignored = true;
            } else {
                read_value(&meta)?;
                let span = meta.path.get_ident().map_or_else(Span::call_site, syn::Ident::span);
                issues.push(ConfigIssue::new(
                    IssueKind::UnknownKey,
                    span,
                    "only `ignore` is accepted on fields",
                ));
            }
            Ok(())
        });

        if let Err(err) = parsed {
            issues.push(ConfigIssue::new(
                IssueKind::Malformed,
                err.span(),
                format!("malformed `#[delta(...)]` attribute: {err}"),
            ));
        }
    }

    (ignored, issues)
}

/// Read `= <literal>` if present.
fn read_value(meta: &syn::meta::ParseNestedMeta<'_>) -> syn::Result<Option<Lit>> {
    if meta.input.peek(Token![=]) {
        let lit: Lit = meta.value()?.parse()?;
        Ok(Some(lit))
    } else {
        Ok(None)
    }
}

fn is_identifier_fragment(value: &str) -> bool {
    value.chars().all(|c| c == '_' || c.is_alphanumeric())
}
