//! Source discovery.
//!
//! Follows `mod` declarations from the crate root file, the way rustc
//! finds a crate's modules. Files that no module declares (stray files,
//! `src/bin/` targets) are never read, and `#[cfg(test)] mod tests;` files
//! are skipped along with their whole subtree.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use syn::{Expr, ExprLit, Item, ItemMod, Lit, Meta};

use crate::collect::is_cfg_test;
use crate::error::{GenerateError, Result};

/// A discovered source file.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct SourceFile {
    /// `crate`, `crate::models`, ...
    pub module_path: String,
    pub path: PathBuf,
}

/// A module file still to be read, with the directory its own
/// out-of-line children live in.
struct PendingFile {
    module_path: String,
    path: PathBuf,
    children_dir: PathBuf,
}

/// Discover the module files of the crate rooted at `root`, sorted by path.
///
/// `root` is a crate source directory such as `src/`. The crate root file
/// is `lib.rs`, or `main.rs` when there is no `lib.rs`. A file that fails
/// to parse is still returned (collection reports it); its `mod`
/// declarations cannot be followed.
pub fn discover_sources(root: &Path) -> Result<Vec<SourceFile>> {
    let Some(crate_root) = ["lib.rs", "main.rs"]
        .iter()
        .map(|name| root.join(name))
        .find(|path| path.is_file())
    else {
        return Err(GenerateError::MissingRoot {
            path: root.to_path_buf(),
        });
    };

    let mut pending = vec![PendingFile {
        module_path: "crate".to_string(),
        path: crate_root,
        children_dir: root.to_path_buf(),
    }];
    let mut files = Vec::new();
    let mut seen = BTreeSet::new();

    while let Some(file) = pending.pop() {
        // `#[path]` can point two declarations at one file.
        if !seen.insert(file.path.clone()) {
            continue;
        }
        let text = fs::read_to_string(&file.path).map_err(|source| GenerateError::Read {
            path: file.path.clone(),
            source,
        })?;
        if let Ok(parsed) = syn::parse_file(&text) {
            declared_modules(&parsed.items, &file.module_path, &file.children_dir, &mut pending);
        }
        files.push(SourceFile {
            module_path: file.module_path,
            path: file.path,
        });
    }

    files.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(files)
}

fn declared_modules(items: &[Item], module_path: &str, dir: &Path, pending: &mut Vec<PendingFile>) {
    for item in items {
        let Item::Mod(module) = item else {
            continue;
        };
        if is_cfg_test(&module.attrs) {
            continue;
        }
        let name = module.ident.to_string();
        let name = name.strip_prefix("r#").unwrap_or(&name);
        let child_path = format!("{module_path}::{name}");

        match &module.content {
            Some((_, inner)) => declared_modules(inner, &child_path, &dir.join(name), pending),
            None => match module_file(module, name, dir) {
                Some(path) => pending.push(PendingFile {
                    module_path: child_path,
                    children_dir: children_dir(&path),
                    path,
                }),
                None => tracing::debug!(module = %child_path, "module file not found"),
            },
        }
    }
}

/// The file of an out-of-line `mod name;` declared in `dir`.
fn module_file(module: &ItemMod, name: &str, dir: &Path) -> Option<PathBuf> {
    if let Some(path) = path_attribute(module) {
        let path = dir.join(path);
        return path.is_file().then_some(path);
    }
    [dir.join(format!("{name}.rs")), dir.join(name).join("mod.rs")]
        .into_iter()
        .find(|path| path.is_file())
}

/// `#[path = "..."]` on a module declaration.
fn path_attribute(module: &ItemMod) -> Option<String> {
    module.attrs.iter().find_map(|attr| match &attr.meta {
        Meta::NameValue(meta) if meta.path.is_ident("path") => match &meta.value {
            Expr::Lit(ExprLit {
                lit: Lit::Str(value),
                ..
            }) => Some(value.value()),
            _ => None,
        },
        _ => None,
    })
}

/// `models/mod.rs` keeps its children beside it; `models.rs` keeps them
/// in `models/`.
fn children_dir(path: &Path) -> PathBuf {
    let parent = path.parent().map(Path::to_path_buf).unwrap_or_default();
    match path.file_stem().and_then(|stem| stem.to_str()) {
        Some("mod") | None => parent,
        Some(stem) => parent.join(stem),
    }
}
