//! Re-rooting property types for the generated module.
//!
//! Generated code lives one module below the model (`<model module>::deltas`)
//! and glob-imports everything the model module can see. Plain names
//! therefore keep working unchanged; only paths anchored at the declaring
//! module need an extra `super`, and `Self` has to be spelled out.

use deltagen_ir::naming::is_keyword;
use proc_macro2::Span;
use quote::ToTokens;
use syn::visit_mut::{self, VisitMut};
use syn::{Ident, PathSegment, Type};

use super::UnresolvablePath;

/// Rewrite `ty` so it means the same thing one module deeper.
///
/// `depth` is how many `super` steps the declaring module allows.
pub fn rehome_type(ty: &Type, type_name: &str, depth: usize) -> Result<Type, UnresolvablePath> {
    let mut rehomed = ty.clone();
    let mut visitor = Rehome {
        type_name,
        depth,
        error: None,
    };
    visitor.visit_type_mut(&mut rehomed);
    match visitor.error {
        Some(err) => Err(err),
        None => Ok(rehomed),
    }
}

/// Render a type as compact source text.
///
/// Token streams print with a space between every token. This removes the
/// spaces around path separators, angle brackets and delimiters, which is
/// enough to make emitted signatures read like hand-written ones.
pub fn spell_type(ty: &Type) -> String {
    let text = ty.to_token_stream().to_string();
    let mut spelled = text
        .replace(" :: ", "::")
        .replace(":: ", "::")
        .replace(" ::", "::")
        .replace(" < ", "<")
        .replace(" <", "<")
        .replace("< ", "<")
        .replace(" >", ">")
        .replace(" ,", ",")
        .replace("& ", "&")
        .replace("[ ", "[")
        .replace(" ]", "]")
        .replace(" ;", ";")
        .replace("( ", "(")
        .replace(" )", ")");
    // `->` keeps its spacing.
    spelled = spelled.replace("->", " -> ").replace("  ", " ");
    spelled.trim().to_string()
}

struct Rehome<'a> {
    type_name: &'a str,
    depth: usize,
    error: Option<UnresolvablePath>,
}

impl VisitMut for Rehome<'_> {
    fn visit_path_mut(&mut self, path: &mut syn::Path) {
        if path.leading_colon.is_none() {
            self.rehome(path);
        }
        visit_mut::visit_path_mut(self, path);
    }
}

impl Rehome<'_> {
    fn rehome(&mut self, path: &mut syn::Path) {
        let Some(first) = path.segments.first_mut() else {
            return;
        };
        match first.ident.to_string().as_str() {
            "Self" => {
                first.ident = Ident::new("super", first.ident.span());
                path.segments.insert(1, PathSegment::from(type_ident(self.type_name)));
            }
            "self" => {
                first.ident = Ident::new("super", first.ident.span());
            }
            "super" => {
                let climbs = path
                    .segments
                    .iter()
                    .take_while(|s| s.ident == "super")
                    .count();
                if climbs > self.depth && self.error.is_none() {
                    self.error = Some(UnresolvablePath {
                        path: path.to_token_stream().to_string().replace(' ', ""),
                    });
                }
                path.segments
                    .insert(0, PathSegment::from(Ident::new("super", Span::call_site())));
            }
            _ => {}
        }
    }
}

fn type_ident(name: &str) -> Ident {
    if is_keyword(name) {
        Ident::new_raw(name, Span::call_site())
    } else {
        Ident::new(name, Span::call_site())
    }
}
