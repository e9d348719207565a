fn main() {
    let report = match deltagen::Generator::new().source_root("src").generate() {
        Ok(report) => report,
        Err(err) => panic!("delta generation failed: {err}"),
    };

    if report.has_errors() {
        for diagnostic in &report.diagnostics {
            eprintln!("{diagnostic}");
        }
        panic!("delta generation reported errors");
    }
}
