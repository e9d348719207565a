//! Name resolution for property types.
//!
//! Resolution is syntactic. A type path is mapped to the identity it would
//! name if it were a tracked type declared in this crate; nothing checks
//! that such a type exists. Graph assembly decides that later by looking
//! the identity up among the collected descriptors.
//!
//! Paths are resolved the way Rust 2018 resolves them from the declaring
//! module:
//! - `crate::a::B` is absolute
//! - `self::B` and `super::B` are relative to the declaring module
//! - a first segment bound by a `use` item is replaced by its target
//! - `std`, `core`, `alloc` and `::`-rooted paths are outside the crate
//! - anything else names an item of the declaring module, or of a glob
//!   import when the module does not declare it

mod rehome;

use std::collections::BTreeMap;

use deltagen_ir::{DeclaredType, TypeIdentity, Wrapper};
use syn::{GenericArgument, PathArguments, Type, UseTree};

pub use rehome::{rehome_type, spell_type};

/// Crates whose paths are never tracked.
const EXTERNAL_ROOTS: &[&str] = &["std", "core", "alloc", "proc_macro", "test"];

/// Prelude and primitive names a bare single-segment path refers to.
const PRELUDE_TYPES: &[&str] = &[
    "bool", "char", "str", "u8", "u16", "u32", "u64", "u128", "usize", "i8", "i16", "i32", "i64",
    "i128", "isize", "f32", "f64", "String", "Vec", "Option", "Box", "Result",
];

/// The names a module's `use` items bring into scope.
///
/// # Salsa Compatibility
/// Has all required traits: Clone, Eq, `PartialEq`, Hash, Debug
#[derive(Clone, Default, Eq, PartialEq, Hash, Debug)]
pub struct ImportScope {
    /// Bound name to crate-absolute (or external) path.
    bindings: BTreeMap<String, String>,
    /// Crate-absolute modules glob-imported, in source order.
    globs: Vec<String>,
}

impl ImportScope {
    /// Collect the `use` items among `items`, declared in `module_path`.
    pub fn from_items(module_path: &str, items: &[syn::Item]) -> Self {
        let mut scope = ImportScope::default();
        for item in items {
            if let syn::Item::Use(item_use) = item {
                let mut prefix = Vec::new();
                if item_use.leading_colon.is_some() {
                    prefix.push(String::new());
                }
                scope.add_tree(module_path, &mut prefix, &item_use.tree);
            }
        }
        scope
    }

    /// The path `name` is bound to by a `use` item.
    pub fn binding(&self, name: &str) -> Option<&str> {
        self.bindings.get(name).map(String::as_str)
    }

    /// Glob-imported modules, in source order.
    pub fn globs(&self) -> &[String] {
        &self.globs
    }

    fn add_tree(&mut self, module_path: &str, prefix: &mut Vec<String>, tree: &UseTree) {
        match tree {
            UseTree::Path(path) => {
                prefix.push(path.ident.to_string());
                self.add_tree(module_path, prefix, &path.tree);
                prefix.pop();
            }
            UseTree::Name(name) => {
                let ident = name.ident.to_string();
                if ident == "self" {
                    // `use a::b::{self}` binds `b`.
                    if let Some(last) = prefix.last().cloned() {
                        self.bind(module_path, last, prefix.clone());
                    }
                } else {
                    let mut target = prefix.clone();
                    target.push(ident.clone());
                    self.bind(module_path, ident, target);
                }
            }
            UseTree::Rename(rename) => {
                let alias = rename.rename.to_string();
                if alias == "_" {
                    return;
                }
                let mut target = prefix.clone();
                target.push(rename.ident.to_string());
                self.bind(module_path, alias, target);
            }
            UseTree::Glob(_) => {
                if let Some(Some(module)) = absolutize_use(module_path, prefix) {
                    self.globs.push(module);
                }
            }
            UseTree::Group(group) => {
                for item in &group.items {
                    self.add_tree(module_path, prefix, item);
                }
            }
        }
    }

    fn bind(&mut self, module_path: &str, alias: String, target: Vec<String>) {
        match absolutize_use(module_path, &target) {
            Some(Some(path)) => {
                self.bindings.insert(strip_raw(&alias), path);
            }
            Some(None) => {
                self.bindings.insert(strip_raw(&alias), target.join("::"));
            }
            // A `use` that climbs above the crate root does not compile; skip it.
            None => {}
        }
    }
}

/// A type path that cannot name anything in the crate.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct UnresolvablePath {
    pub path: String,
}

/// Where a core type path points.
#[derive(Clone, Default, Eq, PartialEq, Debug)]
pub struct Resolved {
    pub core: Option<TypeIdentity>,
    pub glob_candidates: Vec<TypeIdentity>,
}

/// Context for resolving paths written inside one type declaration.
pub struct Resolver<'a> {
    pub module_path: &'a str,
    pub self_identity: &'a TypeIdentity,
    pub scope: &'a ImportScope,
}

impl Resolver<'_> {
    /// Build the declared type of a property written as `ty`.
    pub fn declared_type(&self, ty: &Type) -> Result<DeclaredType, UnresolvablePath> {
        let rehomed = rehome_type(ty, self.self_identity.name(), module_depth(self.module_path))?;
        let (wrapper, core_ty) = unwrap_wrappers(ty);
        let resolved = match core_ty {
            Type::Path(type_path) if type_path.qself.is_none() => self.resolve_path(&type_path.path)?,
            _ => Resolved::default(),
        };
        Ok(DeclaredType {
            spelled: spell_type(&rehomed),
            wrapper,
            core: resolved.core,
            glob_candidates: resolved.glob_candidates,
        })
    }

    /// Resolve a type path to the identity it names, if it is crate-local.
    pub fn resolve_path(&self, path: &syn::Path) -> Result<Resolved, UnresolvablePath> {
        if path.leading_colon.is_some() {
            return Ok(Resolved::default());
        }
        let segments: Vec<String> = path
            .segments
            .iter()
            .map(|s| strip_raw(&s.ident.to_string()))
            .collect();
        let Some(first) = segments.first() else {
            return Ok(Resolved::default());
        };

        let absolute = match first.as_str() {
            "Self" if segments.len() == 1 => {
                return Ok(Resolved {
                    core: Some(self.self_identity.clone()),
                    glob_candidates: Vec::new(),
                });
            }
            "Self" => return Ok(Resolved::default()),
            "crate" | "self" | "super" => {
                absolutize(self.module_path, &segments).ok_or_else(|| UnresolvablePath {
                    path: segments.join("::"),
                })?
            }
            name => {
                if let Some(target) = self.scope.binding(name) {
                    if target != "crate" && !target.starts_with("crate::") {
                        return Ok(Resolved::default());
                    }
                    let mut absolute: Vec<String> =
                        target.split("::").map(ToString::to_string).collect();
                    absolute.extend(segments[1..].iter().cloned());
                    absolute
                } else if EXTERNAL_ROOTS.contains(&name)
                    || (segments.len() == 1 && PRELUDE_TYPES.contains(&name))
                {
                    return Ok(Resolved::default());
                } else {
                    let mut absolute: Vec<String> =
                        self.module_path.split("::").map(ToString::to_string).collect();
                    absolute.extend(segments.iter().cloned());
                    absolute
                }
            }
        };

        let glob_candidates = if segments.len() == 1 && self.scope.binding(first).is_none() {
            self.scope
                .globs()
                .iter()
                .map(|module| TypeIdentity::new(module, first))
                .collect()
        } else {
            Vec::new()
        };

        Ok(Resolved {
            core: Some(TypeIdentity::from_path(absolute.join("::"))),
            glob_candidates,
        })
    }
}

/// Number of `super` steps available from `module_path`.
pub fn module_depth(module_path: &str) -> usize {
    module_path.split("::").count().saturating_sub(1)
}

/// Resolve `crate`, `self` and leading `super` segments against `module_path`.
///
/// Returns `None` when the path climbs above the crate root.
fn absolutize(module_path: &str, segments: &[String]) -> Option<Vec<String>> {
    let mut base: Vec<String> = module_path.split("::").map(ToString::to_string).collect();
    match segments.first().map(String::as_str) {
        Some("crate") => Some(segments.to_vec()),
        Some("self") => {
            base.extend(segments[1..].iter().cloned());
            Some(base)
        }
        Some("super") => {
            let climbs = segments.iter().take_while(|s| *s == "super").count();
            if climbs >= base.len() {
                return None;
            }
            base.truncate(base.len() - climbs);
            base.extend(segments[climbs..].iter().cloned());
            Some(base)
        }
        _ => {
            base.extend(segments.iter().cloned());
            Some(base)
        }
    }
}

/// Absolutize a `use` path.
///
/// `Some(None)` marks a path outside the crate; `None` one that climbs
/// above the crate root.
fn absolutize_use(module_path: &str, segments: &[String]) -> Option<Option<String>> {
    match segments.first().map(String::as_str) {
        None => Some(None),
        // Leading `::`.
        Some("") => Some(None),
        Some(first) if EXTERNAL_ROOTS.contains(&first) => Some(None),
        Some(_) => absolutize(module_path, segments).map(|path| Some(path.join("::"))),
    }
}

fn strip_raw(ident: &str) -> String {
    ident.strip_prefix("r#").unwrap_or(ident).to_string()
}

/// Peel the wrappers that are looked through for nesting.
///
/// Recognises `Option<T>`, `Box<T>` and `Option<Box<T>>`, written bare or
/// through `std`/`core`/`alloc` paths.
pub fn unwrap_wrappers(ty: &Type) -> (Wrapper, &Type) {
    if let Some(inner) = single_argument(ty, &["option", "Option"]) {
        if let Some(core) = single_argument(inner, &["boxed", "Box"]) {
            return (Wrapper::OptionalBoxed, core);
        }
        return (Wrapper::Optional, inner);
    }
    if let Some(core) = single_argument(ty, &["boxed", "Box"]) {
        return (Wrapper::Boxed, core);
    }
    (Wrapper::Plain, ty)
}

/// If `ty` is `[std|core|alloc::]<module>::<name><T>` or `<name><T>`,
/// return `T`.
fn single_argument<'t>(ty: &'t Type, module_and_name: &[&str; 2]) -> Option<&'t Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    if type_path.qself.is_some() {
        return None;
    }
    let names: Vec<String> = type_path
        .path
        .segments
        .iter()
        .map(|s| s.ident.to_string())
        .collect();
    let [module, name] = module_and_name;
    let matches = match names.as_slice() {
        [only] => only == name,
        [root, m, n] => ["std", "core", "alloc"].contains(&root.as_str()) && m == module && n == name,
        _ => false,
    };
    if !matches {
        return None;
    }
    let last = type_path.path.segments.last()?;
    let PathArguments::AngleBracketed(args) = &last.arguments else {
        return None;
    };
    let mut types = args.args.iter().filter_map(|arg| match arg {
        GenericArgument::Type(ty) => Some(ty),
        _ => None,
    });
    let first = types.next()?;
    if types.next().is_some() || args.args.len() != 1 {
        return None;
    }
    Some(first)
}

#[cfg(test)]
mod tests;
