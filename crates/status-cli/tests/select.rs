use std::io::Write;
use std::path::PathBuf;

use status_cli::select::run_selection_with_config;

fn data_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/customer_status.csv")
}

#[test]
fn selection_with_contiguous_folds_and_first_wins() {
    let mut config = tempfile::NamedTempFile::new().unwrap();
    write!(
        config,
        r#"{{"fold_strategy": "contiguous", "tie_break": "first_wins", "parallel_folds": true}}"#
    )
    .unwrap();

    let report = run_selection_with_config(data_path(), config.path()).unwrap();
    assert_eq!(report.entries.len(), 4);
    assert_eq!(report.n_train, 80);
    assert_eq!(report.validation_count, 20);

    let best = report.entries.iter().map(|e| e.mean()).fold(f64::MIN, f64::max);
    let first_best = report.entries.iter().find(|e| e.mean() == best).unwrap();
    assert_eq!(report.winner, first_best.name);
}
