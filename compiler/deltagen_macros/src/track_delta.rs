//! TrackDelta derive implementation.
//!
//! Validation only. Arguments the generator would silently correct (an empty
//! suffix, for instance) are accepted here; unknown or mistyped arguments are
//! compile errors.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use syn::{parse_macro_input, Data, DeriveInput};

use deltagen_ir::{is_ignored_field, parse_marker_config, ConfigIssue};

/// Main entry point for the TrackDelta derive macro.
pub fn derive_track_delta(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match derive_track_delta_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn derive_track_delta_impl(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let fields = match &input.data {
        Data::Struct(data) => &data.fields,
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "TrackDelta derive only supports structs",
            ))
        }
    };

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "TrackDelta does not support generic or lifetime parameters",
        ));
    }

    let (_, mut issues) = parse_marker_config(&input.attrs);
    for field in fields {
        let (_, field_issues) = is_ignored_field(&field.attrs);
        issues.extend(field_issues);
    }

    match combine_hard_issues(issues) {
        Some(err) => Err(err),
        None => Ok(TokenStream2::new()),
    }
}

/// Fold every hard issue into one error so all of them are reported at once.
fn combine_hard_issues(issues: Vec<ConfigIssue>) -> Option<syn::Error> {
    issues
        .into_iter()
        .filter(|issue| issue.kind.is_hard())
        .map(|issue| syn::Error::new(issue.span, issue.message))
        .reduce(|mut acc, err| {
            acc.combine(err);
            acc
        })
}
