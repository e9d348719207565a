//! Candidate collection.
//!
//! Finds every type declaration carrying the tracking marker in one source
//! file, including declarations in inline `mod` blocks. Candidates are plain
//! data: the declaration is kept as normalized token text so that a
//! whitespace or comment edit produces an equal candidate and everything
//! downstream is reused.

use deltagen_ir::{is_tracking_marker, TypeIdentity};
use quote::ToTokens;
use syn::punctuated::Punctuated;
use syn::{Attribute, Fields, Item};

use crate::diagnostic::{Diagnostic, ErrorCode};
use crate::resolve::ImportScope;

/// Declaration kind of a candidate.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum CandidateKind {
    Struct,
    Enum,
    Union,
}

impl CandidateKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CandidateKind::Struct => "struct",
            CandidateKind::Enum => "enum",
            CandidateKind::Union => "union",
        }
    }
}

/// A marked type declaration.
///
/// # Salsa Compatibility
/// Has all required traits: Clone, Eq, `PartialEq`, Hash, Debug
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Candidate {
    pub identity: TypeIdentity,
    pub kind: CandidateKind,
    /// Imports visible at the declaration.
    pub scope: ImportScope,
    /// The declaration without doc attributes, as token text.
    pub item: String,
}

impl Candidate {
    pub fn module_path(&self) -> &str {
        self.identity.module_path()
    }
}

/// Everything collected from one source file.
///
/// # Salsa Compatibility
/// Has all required traits: Clone, Eq, `PartialEq`, Hash, Debug
#[derive(Clone, Default, Eq, PartialEq, Hash, Debug)]
pub struct Collected {
    /// Candidates in source order.
    pub candidates: Vec<Candidate>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Collect the marked declarations of a file whose items live in `module_path`.
///
/// A file that does not parse yields no candidates and one D0001 error.
pub fn collect_file(module_path: &str, file_label: &str, text: &str) -> Collected {
    let mut collected = Collected::default();
    match syn::parse_file(text) {
        Ok(file) => collect_items(module_path, &file.items, &mut collected),
        Err(err) => collected.diagnostics.push(
            Diagnostic::error(ErrorCode::D0001)
                .with_message(format!("failed to parse source: {err}"))
                .with_subject(file_label)
                .with_note("no delta types are generated from this file"),
        ),
    }
    tracing::debug!(
        module_path,
        candidates = collected.candidates.len(),
        "collected candidates"
    );
    collected
}

fn collect_items(module_path: &str, items: &[Item], out: &mut Collected) {
    let mut imports = None;
    for item in items {
        let (ident, attrs, kind) = match item {
            Item::Struct(item) => (&item.ident, &item.attrs, CandidateKind::Struct),
            Item::Enum(item) => (&item.ident, &item.attrs, CandidateKind::Enum),
            Item::Union(item) => (&item.ident, &item.attrs, CandidateKind::Union),
            Item::Mod(item) => {
                if let Some((_, content)) = &item.content {
                    if !is_cfg_test(&item.attrs) {
                        let name = item.ident.to_string();
                        let name = name.strip_prefix("r#").unwrap_or(&name);
                        collect_items(&format!("{module_path}::{name}"), content, out);
                    }
                }
                continue;
            }
            _ => continue,
        };
        if !attrs.iter().any(is_tracking_marker) {
            continue;
        }
        let scope = imports.get_or_insert_with(|| ImportScope::from_items(module_path, items));
        let name = ident.to_string();
        let name = name.strip_prefix("r#").unwrap_or(&name);
        out.candidates.push(Candidate {
            identity: TypeIdentity::new(module_path, name),
            kind,
            scope: scope.clone(),
            item: normalized_item(item),
        });
    }
}

/// Token text of `item` with doc attributes removed from it and its fields.
fn normalized_item(item: &Item) -> String {
    let mut item = item.clone();
    match &mut item {
        Item::Struct(item) => {
            strip_docs(&mut item.attrs);
            for field in &mut item.fields {
                strip_docs(&mut field.attrs);
            }
            match &mut item.fields {
                Fields::Named(fields) => drop_trailing_punct(&mut fields.named),
                Fields::Unnamed(fields) => drop_trailing_punct(&mut fields.unnamed),
                Fields::Unit => {}
            }
        }
        Item::Enum(item) => {
            strip_docs(&mut item.attrs);
            drop_trailing_punct(&mut item.variants);
        }
        Item::Union(item) => strip_docs(&mut item.attrs),
        _ => {}
    }
    item.to_token_stream().to_string()
}

/// `a, b,` and `a, b` must normalize to the same text.
fn drop_trailing_punct<T, P: Default>(list: &mut Punctuated<T, P>) {
    *list = std::mem::take(list).into_iter().collect();
}

fn strip_docs(attrs: &mut Vec<Attribute>) {
    attrs.retain(|attr| !attr.path().is_ident("doc"));
}

pub(crate) fn is_cfg_test(attrs: &[Attribute]) -> bool {
    attrs.iter().any(|attr| {
        attr.path().is_ident("cfg")
            && attr
                .parse_args::<syn::Ident>()
                .is_ok_and(|ident| ident == "test")
    })
}
