//! CLI binary smoke tests using assert_cmd.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;

const DATA: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/customer_status.csv");

fn cmd() -> Command {
    Command::cargo_bin("status-select").unwrap()
}

#[test]
fn no_args_shows_help() {
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("status-select"));
}

#[test]
fn default_run_prints_report_and_echoes_config() {
    cmd()
        .arg(DATA)
        .assert()
        .success()
        .stdout(predicate::str::contains("Accuracy rate of OneVsRest: "))
        .stdout(predicate::str::contains("Accuracy rate of AdaBoostClassifier: "))
        .stdout(predicate::str::contains("Winner: "))
        .stdout(predicate::str::is_match(r"Algorithm accuracy rate: \d+\.\d{2}%").unwrap())
        .stdout(predicate::str::is_match(r"Baseline accuracy rate: \d+\.\d{2}%").unwrap())
        .stdout(predicate::str::contains("Total elements tested: 20"))
        .stderr(predicate::str::contains("\"n_folds\": 10"))
        .stderr(predicate::str::contains("\"delimiter\": \",\""));
}

#[test]
fn config_file_limits_the_roster() {
    let mut config = tempfile::NamedTempFile::new().unwrap();
    write!(
        config,
        r#"{{"n_folds": 5, "candidates": [{{"name": "NB", "MultinomialNb": {{"alpha": 1.0}}}}]}}"#
    )
    .unwrap();

    cmd()
        .arg(DATA)
        .arg(config.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Accuracy rate of NB: "))
        .stdout(predicate::str::contains("Winner: NB"))
        .stdout(predicate::str::contains("OneVsRest").not());
}

/// The bundled customers rewritten with other headers and a `;` separator.
fn relabelled_customers() -> tempfile::NamedTempFile {
    let original = std::fs::read_to_string(DATA).unwrap();
    let mut lines = original.lines();
    lines.next();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "recencia;frequencia;semanas_de_inscricao;situacao").unwrap();
    for line in lines {
        writeln!(file, "{}", line.replace(',', ";")).unwrap();
    }
    file.flush().unwrap();
    file
}

#[test]
fn loader_section_renames_columns_and_delimiter() {
    let data = relabelled_customers();
    let mut config = tempfile::NamedTempFile::new().unwrap();
    write!(
        config,
        r#"{{"n_folds": 5,
            "candidates": [{{"name": "NB", "MultinomialNb": {{"alpha": 1.0}}}}],
            "loader": {{
                "feature_columns": ["recencia", "frequencia", "semanas_de_inscricao"],
                "label_column": "situacao",
                "delimiter": ";"
            }}}}"#
    )
    .unwrap();

    cmd()
        .arg(data.path())
        .arg(config.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Winner: NB"))
        .stdout(predicate::str::contains("Total elements tested: 20"));
}

#[test]
fn default_loader_rejects_relabelled_columns() {
    let data = relabelled_customers();
    cmd()
        .arg(data.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Column 'recency' not found in header"));
}

#[test]
fn nonexistent_data_file_fails() {
    cmd()
        .arg("/nonexistent/customers.csv")
        .assert()
        .failure()
        .code(1);
}

#[test]
fn malformed_config_fails() {
    let mut config = tempfile::NamedTempFile::new().unwrap();
    write!(config, "not json").unwrap();
    cmd().arg(DATA).arg(config.path()).assert().failure().code(1);
}

#[test]
fn single_fold_config_fails() {
    let mut config = tempfile::NamedTempFile::new().unwrap();
    write!(config, r#"{{"n_folds": 1}}"#).unwrap();
    cmd().arg(DATA).arg(config.path()).assert().failure().code(1);
}
