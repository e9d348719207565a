use super::*;
use pretty_assertions::assert_eq;
use std::path::Path;

fn write(root: &Path, relative: &str, text: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, text).unwrap();
}

fn quiet() -> Generator {
    Generator::new()
        .emit_rerun_if_changed(false)
        .cargo_warnings(false)
}

fn discovered(root: &Path) -> Vec<String> {
    discover_sources(root)
        .unwrap()
        .into_iter()
        .map(|s| s.module_path)
        .collect()
}

#[test]
fn test_discovery_follows_mod_declarations() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root, "lib.rs", "pub mod models;\nmod util { pub mod deep; }\n#[cfg(test)]\nmod tests;");
    write(root, "models/mod.rs", "pub mod user;");
    write(root, "models/user.rs", "#[cfg(test)]\nmod tests;");
    write(root, "models/user/tests.rs", "");
    write(root, "util/deep.rs", "");
    write(root, "tests.rs", "");
    write(root, "stray.rs", "");
    write(root, "bin/tool.rs", "");

    assert_eq!(
        discovered(root),
        vec!["crate", "crate::models", "crate::models::user", "crate::util::deep"]
    );
}

#[test]
fn test_discovery_honours_path_attributes() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root, "main.rs", "#[path = \"generated/shapes.rs\"]\nmod shapes;\nmod missing;");
    write(root, "generated/shapes.rs", "");

    let sources = discover_sources(root).unwrap();
    assert_eq!(sources.len(), 2);
    assert_eq!(sources[0].module_path, "crate::shapes");
    assert!(sources[0].path.ends_with("generated/shapes.rs"));
    assert_eq!(sources[1].module_path, "crate");
}

#[test]
fn test_test_modules_do_not_collide_with_models() {
    let src = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    write(src.path(), "lib.rs", "pub mod models;");
    write(
        src.path(),
        "models.rs",
        "#[derive(TrackDelta)] pub struct User { pub name: String }\n#[cfg(test)]\nmod tests;",
    );
    write(
        src.path(),
        "models/tests.rs",
        "#[derive(TrackDelta)] pub struct User { pub id: u8 }",
    );

    let report = quiet()
        .source_root(src.path())
        .out_dir(out.path())
        .generate()
        .unwrap();
    assert!(report.diagnostics.is_empty(), "{:?}", report.diagnostics);
    let text = fs::read_to_string(out.path().join("UserDelta.g.rs")).unwrap();
    assert!(text.contains("pub fn name(&self)"));
}

#[test]
fn test_missing_root_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = discover_sources(&dir.path().join("nope")).unwrap_err();
    assert!(matches!(err, GenerateError::MissingRoot { .. }));
}

#[test]
fn test_generate_writes_units() {
    let src = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    write(
        src.path(),
        "lib.rs",
        "pub mod models; pub mod delta_support {}",
    );
    write(
        src.path(),
        "models.rs",
        "#[derive(TrackDelta)] pub struct User { pub name: String }",
    );

    let report = quiet()
        .source_root(src.path())
        .out_dir(out.path())
        .generate()
        .unwrap();

    assert!(!report.has_errors());
    let mut written: Vec<String> = report
        .written
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    written.sort();
    assert_eq!(written, vec!["DeltaSupport.g.rs", "UserDelta.g.rs", "models.deltas.rs"]);

    let text = fs::read_to_string(out.path().join("UserDelta.g.rs")).unwrap();
    assert!(text.contains("pub struct UserDelta<'a>"));
}

#[test]
fn test_unchanged_files_are_not_rewritten() {
    let src = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    write(src.path(), "lib.rs", "#[derive(TrackDelta)] pub struct A { pub x: u8 }");

    let run = || {
        quiet()
            .source_root(src.path())
            .out_dir(out.path())
            .generate()
            .unwrap()
    };
    let first = run();
    assert_eq!(first.written.len(), 3);

    let second = run();
    assert!(second.written.is_empty());
    assert_eq!(second.unchanged.len(), 3);
}

#[test]
fn test_explicit_files_and_options() {
    let src = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    write(src.path(), "shapes.rs", "#[derive(TrackDelta)] pub struct Square(pub u32);");

    let report = quiet()
        .source_file("crate::geometry::shapes", src.path().join("shapes.rs"))
        .out_dir(out.path())
        .support_scheduled(true)
        .deltas_module("changes")
        .generate()
        .unwrap();

    assert_eq!(report.written.len(), 2);
    let manifest = fs::read_to_string(out.path().join("geometry__shapes.deltas.rs")).unwrap();
    assert!(manifest.contains("pub mod changes {"));
    assert!(!out.path().join("DeltaSupport.g.rs").exists());
}

#[test]
fn test_diagnostics_are_reported_not_fatal() {
    let src = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    write(src.path(), "lib.rs", "#[derive(TrackDelta)] pub enum E { A }");

    let report = quiet()
        .source_root(src.path())
        .out_dir(out.path())
        .generate()
        .unwrap();
    assert!(report.has_errors());
    assert!(out.path().join("crate.deltas.rs").exists());
}

#[test]
fn test_invalid_options_fail_early() {
    let out = tempfile::tempdir().unwrap();
    let err = quiet()
        .out_dir(out.path())
        .deltas_module("not valid")
        .generate()
        .unwrap_err();
    assert!(matches!(
        err,
        GenerateError::InvalidOption {
            option: "deltas_module",
            ..
        }
    ));
    assert_eq!(
        err.to_string(),
        "invalid option `deltas_module`: `not valid` is not a plain identifier"
    );
}

#[test]
fn test_unreadable_file_is_an_error() {
    let out = tempfile::tempdir().unwrap();
    let err = quiet()
        .source_file("crate", out.path().join("missing.rs"))
        .out_dir(out.path())
        .generate()
        .unwrap_err();
    assert!(matches!(err, GenerateError::Read { .. }));
}
