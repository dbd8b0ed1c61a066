use std::fs;

use slate::session::{Session, SessionOptions};
use walkdir::WalkDir;

#[test]
fn demo_scripts_run_cleanly() {
    let mut count = 0;

    for entry in
        WalkDir::new("demos").into_iter()
                             .filter_map(Result::ok)
                             .filter(|e| e.path().extension().is_some_and(|ext| ext == "slate"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        count += 1;
        let mut session = Session::new(SessionOptions::default());
        let annotations = session.run(&content)
                                 .unwrap_or_else(|e| panic!("Demo {path:?} failed to parse: {e}"));

        if let Some(failed) = annotations.iter().find(|a| a.is_error()) {
            panic!("Demo {path:?} failed:\n{failed}");
        }
    }

    assert!(count > 0, "No demo scripts found in demos/");
}

#[test]
fn demo_output_is_attached_to_statements() {
    let content = fs::read_to_string("demos/currying.slate").unwrap();
    let mut session = Session::new(SessionOptions::default());
    let annotations = session.run(&content).unwrap();

    let printed = annotations.iter()
                             .flat_map(|a| a.output.iter().cloned())
                             .collect::<Vec<_>>();
    assert_eq!(printed, vec!["[0, 7, 0]".to_string()]);
}
