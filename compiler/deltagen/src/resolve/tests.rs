use super::*;
use pretty_assertions::assert_eq;

fn scope(module_path: &str, source: &str) -> ImportScope {
    let file: syn::File = match syn::parse_str(source) {
        Ok(file) => file,
        Err(err) => panic!("fixture does not parse: {err}"),
    };
    ImportScope::from_items(module_path, &file.items)
}

fn ty(source: &str) -> Type {
    match syn::parse_str(source) {
        Ok(ty) => ty,
        Err(err) => panic!("type does not parse: {err}"),
    }
}

fn declared(module_path: &str, imports: &str, source: &str) -> Result<DeclaredType, UnresolvablePath> {
    let self_identity = TypeIdentity::new(module_path, "Owner");
    let scope = scope(module_path, imports);
    let resolver = Resolver {
        module_path,
        self_identity: &self_identity,
        scope: &scope,
    };
    resolver.declared_type(&ty(source))
}

fn core(module_path: &str, imports: &str, source: &str) -> Option<String> {
    declared(module_path, imports, source)
        .ok()
        .and_then(|d| d.core)
        .map(|id| id.to_string())
}

#[test]
fn test_import_scope_bindings() {
    let scope = scope(
        "crate::models",
        "use crate::other::Child; use super::Sibling as Renamed; use self::inner::{Leaf, deep::Deeper}; use std::collections::HashMap;",
    );
    assert_eq!(scope.binding("Child"), Some("crate::other::Child"));
    assert_eq!(scope.binding("Renamed"), Some("crate::Sibling"));
    assert_eq!(scope.binding("Leaf"), Some("crate::models::inner::Leaf"));
    assert_eq!(scope.binding("Deeper"), Some("crate::models::inner::deep::Deeper"));
    assert_eq!(scope.binding("HashMap"), Some("std::collections::HashMap"));
    assert_eq!(scope.binding("Sibling"), None);
}

#[test]
fn test_import_scope_self_in_group_and_globs() {
    let scope = scope(
        "crate",
        "use crate::models::{self}; use crate::shared::*; use std::fmt::*; use crate::x::Y as _;",
    );
    assert_eq!(scope.binding("models"), Some("crate::models"));
    assert_eq!(scope.globs(), &["crate::shared".to_string()]);
    assert_eq!(scope.binding("_"), None);
}

#[test]
fn test_resolves_local_and_absolute_paths() {
    assert_eq!(core("crate::models", "", "Child"), Some("crate::models::Child".into()));
    assert_eq!(core("crate::models", "", "crate::a::B"), Some("crate::a::B".into()));
    assert_eq!(core("crate::models", "", "self::B"), Some("crate::models::B".into()));
    assert_eq!(core("crate::models", "", "super::B"), Some("crate::B".into()));
    assert_eq!(core("crate::models", "", "inner::B"), Some("crate::models::inner::B".into()));
}

#[test]
fn test_resolves_through_imports() {
    let imports = "use crate::other::Child; use crate::other;";
    assert_eq!(core("crate::models", imports, "Child"), Some("crate::other::Child".into()));
    assert_eq!(core("crate::models", imports, "other::Leaf"), Some("crate::other::Leaf".into()));
}

#[test]
fn test_external_and_prelude_types_have_no_core() {
    let imports = "use std::collections::HashMap;";
    for source in ["String", "u32", "Vec<Child>", "HashMap<String, i32>", "::serde::Value", "std::path::PathBuf", "(i32, i32)", "[u8; 4]"] {
        assert_eq!(core("crate::models", imports, source), None, "{source}");
    }
}

#[test]
fn test_self_resolves_to_owner() {
    assert_eq!(core("crate::models", "", "Self"), Some("crate::models::Owner".into()));
    assert_eq!(core("crate::models", "", "Option<Box<Self>>"), Some("crate::models::Owner".into()));
}

#[test]
fn test_super_above_root_is_unresolvable() {
    let result = declared("crate", "", "super::Thing");
    assert_eq!(
        result.err(),
        Some(UnresolvablePath {
            path: "super::Thing".to_string()
        })
    );
    assert!(declared("crate::a", "", "Vec<super::super::Thing>").is_err());
    assert!(declared("crate::a::b", "", "super::super::Thing").is_ok());
}

#[test]
fn test_glob_candidates_for_bare_names() {
    let result = declared("crate::models", "use crate::shared::*; use super::*;", "Child");
    let declared = match result {
        Ok(declared) => declared,
        Err(err) => panic!("unexpected {err:?}"),
    };
    assert_eq!(declared.core.map(|c| c.to_string()), Some("crate::models::Child".into()));
    let globs: Vec<String> = declared.glob_candidates.iter().map(ToString::to_string).collect();
    assert_eq!(globs, vec!["crate::shared::Child".to_string(), "crate::Child".to_string()]);
}

#[test]
fn test_wrappers_are_unwrapped() {
    let cases = [
        ("Child", Wrapper::Plain),
        ("Option<Child>", Wrapper::Optional),
        ("std::option::Option<Child>", Wrapper::Optional),
        ("Box<Child>", Wrapper::Boxed),
        ("::std::boxed::Box<Child>", Wrapper::Boxed),
        ("Option<Box<Child>>", Wrapper::OptionalBoxed),
        ("core::option::Option<alloc::boxed::Box<Child>>", Wrapper::OptionalBoxed),
        ("Box<Option<Child>>", Wrapper::Boxed),
        ("Vec<Child>", Wrapper::Plain),
    ];
    for (source, expected) in cases {
        let parsed = ty(source);
        let (wrapper, _) = unwrap_wrappers(&parsed);
        assert_eq!(wrapper, expected, "{source}");
    }
}

#[test]
fn test_wrapped_core_resolves() {
    assert_eq!(core("crate", "", "Option<Box<Node>>"), Some("crate::Node".into()));
    // Only the outer `Box` of `Box<Option<T>>` is peeled; `Option<Node>` stays opaque.
    assert_eq!(core("crate", "", "Box<Option<Node>>"), None);
}

#[test]
fn test_spelled_types_are_rehomed() {
    let spelled = |source: &str| {
        declared("crate::models", "", source)
            .map(|d| d.spelled)
            .unwrap_or_default()
    };
    assert_eq!(spelled("String"), "String");
    assert_eq!(spelled("Option<Box<Self>>"), "Option<Box<super::Owner>>");
    assert_eq!(spelled("self::Child"), "super::Child");
    assert_eq!(spelled("super::Child"), "super::super::Child");
    assert_eq!(spelled("crate::a::B"), "crate::a::B");
    assert_eq!(spelled("Vec<Vec<u8>>"), "Vec<Vec<u8>>");
    assert_eq!(spelled("&'static str"), "&'static str");
    assert_eq!(spelled("(i32, Self)"), "(i32, super::Owner)");
    assert_eq!(spelled("[u8; 4]"), "[u8; 4]");
}

#[test]
fn test_module_depth() {
    assert_eq!(module_depth("crate"), 0);
    assert_eq!(module_depth("crate::a::b"), 2);
}
