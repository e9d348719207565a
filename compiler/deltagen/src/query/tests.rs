use super::*;
use crate::db::GeneratorDb;
use crate::diagnostic::ErrorCode;
use crate::output::UnitKind;
use pretty_assertions::assert_eq;
use salsa::Setter;
use std::path::PathBuf;

const USER: &str = r"
#[derive(TrackDelta)]
pub struct User {
    pub name: String,
    pub age: u32,
}
";

const ORDER: &str = r"
use crate::users::User;

#[derive(TrackDelta)]
pub struct Order {
    pub id: u64,
    pub buyer: User,
}
";

fn unit(db: &GeneratorDb, module_path: &str, text: &str) -> SourceUnit {
    SourceUnit::new(
        db,
        module_path.to_string(),
        PathBuf::from(format!("src/{}.rs", module_path.trim_start_matches("crate::"))),
        text.to_string(),
    )
}

fn compilation(db: &GeneratorDb, units: Vec<SourceUnit>) -> Compilation {
    Compilation::new(db, units, EmitOptions::default())
}

fn file_names(generation: &Generation) -> Vec<&str> {
    generation.units.iter().map(|u| u.file_name.as_str()).collect()
}

#[test]
fn test_collected_is_cached() {
    let db = GeneratorDb::new();
    db.enable_logging();
    let users = unit(&db, "crate::users", USER);

    let first = collected(&db, users);
    assert_eq!(first.candidates.len(), 1);
    assert!(!db.take_logs().is_empty(), "First call should execute query");

    let _ = collected(&db, users);
    assert!(db.take_logs().is_empty(), "Second call should use cache");
}

#[test]
fn test_generation_layout() {
    let db = GeneratorDb::new();
    let users = unit(&db, "crate::users", USER);
    let orders = unit(&db, "crate::orders", ORDER);
    let compilation = compilation(&db, vec![orders, users]);

    let generation = generated(&db, compilation);
    assert!(generation.diagnostics.is_empty(), "{:?}", generation.diagnostics);
    assert_eq!(
        file_names(&generation),
        vec![
            "DeltaSupport.g.rs",
            "OrderDelta.g.rs",
            "UserDelta.g.rs",
            "orders.deltas.rs",
            "users.deltas.rs",
        ]
    );

    let order = generation.unit("OrderDelta.g.rs").map(|u| u.text.as_str()).unwrap_or_default();
    assert!(order.contains("crate::users::deltas::UserDelta<'a>"));
}

#[test]
fn test_whitespace_edit_only_recollects() {
    let mut db = GeneratorDb::new();
    let users = unit(&db, "crate::users", USER);
    let orders = unit(&db, "crate::orders", ORDER);
    let compilation = compilation(&db, vec![orders, users]);

    let before = generated(&db, compilation);
    db.enable_logging();

    users
        .set_text(&mut db)
        .to(format!("// Users of the shop.\n\n{}\n\n", USER.replace("    ", "\t")));
    let after = generated(&db, compilation);

    let logs = db.take_logs();
    assert_eq!(logs.len(), 1, "only the edited file is re-collected: {logs:?}");
    assert_eq!(before, after);
}

#[test]
fn test_unrelated_edit_reuses_other_units() {
    let mut db = GeneratorDb::new();
    let users = unit(&db, "crate::users", USER);
    let other = unit(
        &db,
        "crate::settings",
        "#[derive(TrackDelta)] pub struct Settings { pub theme: String }",
    );
    let compilation = compilation(&db, vec![other, users]);

    db.enable_logging();
    let before = generated(&db, compilation);
    let first_run = db.take_logs().len();

    other
        .set_text(&mut db)
        .to("#[derive(TrackDelta)] pub struct Settings { pub theme: String, pub font_size: u8 }".to_string());
    let after = generated(&db, compilation);
    let second_run = db.take_logs().len();

    assert!(second_run < first_run, "{second_run} >= {first_run}");
    assert_eq!(before.unit("UserDelta.g.rs"), after.unit("UserDelta.g.rs"));
    assert_ne!(before.unit("SettingsDelta.g.rs"), after.unit("SettingsDelta.g.rs"));
}

#[test]
fn test_support_unit_can_be_scheduled_elsewhere() {
    let mut db = GeneratorDb::new();
    let users = unit(&db, "crate::users", USER);
    let compilation = compilation(&db, vec![users]);

    let generation = generated(&db, compilation);
    assert_eq!(generation.units_of(UnitKind::Support).count(), 1);

    let options = EmitOptions {
        support_scheduled: true,
        ..EmitOptions::default()
    };
    compilation.set_options(&mut db).to(options);
    let generation = generated(&db, compilation);
    assert_eq!(generation.units_of(UnitKind::Support).count(), 0);
    assert_eq!(generation.units_of(UnitKind::Delta).count(), 1);
}

#[test]
fn test_failing_module_keeps_its_manifest() {
    let db = GeneratorDb::new();
    let broken = unit(
        &db,
        "crate::states",
        "#[derive(TrackDelta)] pub enum State { On, Off }",
    );
    let compilation = compilation(&db, vec![broken]);

    let generation = generated(&db, compilation);
    assert!(generation.has_errors());
    assert_eq!(generation.diagnostics[0].code, ErrorCode::D0002);
    assert_eq!(file_names(&generation), vec!["DeltaSupport.g.rs", "states.deltas.rs"]);
}

#[test]
fn test_parse_failure_does_not_stop_other_units() {
    let db = GeneratorDb::new();
    let broken = unit(&db, "crate::broken", "pub struct {");
    let users = unit(&db, "crate::users", USER);
    let compilation = compilation(&db, vec![broken, users]);

    let generation = generated(&db, compilation);
    let codes: Vec<ErrorCode> = generation.diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(codes, vec![ErrorCode::D0001]);
    assert!(generation.unit("UserDelta.g.rs").is_some());
}

#[test]
fn test_descriptor_graph_cycle() {
    let db = GeneratorDb::new();
    let tree = unit(
        &db,
        "crate::tree",
        r"
        #[derive(TrackDelta)]
        pub struct Node { pub value: i32, pub children_head: Option<Box<Node>>, pub owner: Option<Box<Owner>> }
        #[derive(TrackDelta)]
        pub struct Owner { pub root: Option<Box<Node>> }
        ",
    );
    let compilation = compilation(&db, vec![tree]);

    let graph = descriptor_graph(&db, compilation);
    assert_eq!(graph.len(), 2);
    let generation = generated(&db, compilation);
    assert_eq!(generation.units_of(UnitKind::Delta).count(), 2);
}
