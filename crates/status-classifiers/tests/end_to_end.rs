use std::io::Write;

use ndarray::Array2;
use status_classifiers::config::{
    load_config, BinaryModelType, CandidateConfig, ModelType, SelectionConfig,
};
use status_classifiers::data_handling::Dataset;
use status_classifiers::io::{read_dataset, LoaderConfig};
use status_classifiers::pipeline::run;
use status_classifiers::SelectionError;

/// Three well separated customer groups, rows interleaved by class.
fn customers(n: usize) -> Dataset {
    let labels: Vec<&str> = (0..n).map(|i| ["active", "lapsed", "churned"][i % 3]).collect();
    let features = Array2::from_shape_fn((n, 3), |(i, c)| {
        let k = i % 3;
        match c {
            0 => [2.0, 12.0, 30.0][k] + ((i * 7) % 5) as f64,
            1 => [20.0, 10.0, 2.0][k] + ((i * 3) % 4) as f64,
            _ => [40.0, 20.0, 6.0][k] + (i % 6) as f64,
        }
    });
    Dataset::from_labels(
        features,
        &labels,
        vec!["recency".into(), "frequency".into(), "weeks_since_signup".into()],
    )
    .unwrap()
}

#[test]
fn default_run_over_one_hundred_customers() {
    let _ = env_logger::builder().is_test(true).try_init();

    let report = run(&customers(100), &SelectionConfig::default()).unwrap();

    assert_eq!(report.n_train, 80);
    assert_eq!(report.validation_count, 20);
    let names: Vec<_> = report.entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["OneVsRest", "OneVsOne", "MultinomialNB", "AdaBoostClassifier"]);
    for entry in &report.entries {
        assert!((0.0..=1.0).contains(&entry.mean()), "{}", entry.name);
        assert_eq!(entry.score.fold_scores.len(), 10);
    }

    let best = report.entries.iter().map(|e| e.mean()).fold(f64::MIN, f64::max);
    let winner = report.entries.iter().find(|e| e.name == report.winner).unwrap();
    assert_eq!(winner.mean(), best);

    let acc = report.validation.formatted_accuracy();
    let decimals = acc.split('.').nth(1).unwrap();
    assert_eq!(decimals.len(), 2);
    assert_eq!(report.validation.total, 20);

    let text = report.to_string();
    assert!(text.contains(&format!("Winner: {}", report.winner)));
    assert!(text.ends_with("Total elements tested: 20"));
}

#[test]
fn full_training_fraction_is_data_error() {
    let config = SelectionConfig {
        train_fraction: 1.0,
        ..SelectionConfig::default()
    };
    assert!(matches!(run(&customers(100), &config), Err(SelectionError::Data(_))));
}

#[test]
fn too_many_folds_fail_before_fitting() {
    let config = SelectionConfig {
        n_folds: 50,
        ..SelectionConfig::default()
    };
    assert!(matches!(
        run(&customers(30), &config),
        Err(SelectionError::Configuration(_))
    ));
}

#[test]
fn bad_candidate_settings_fail_before_any_candidate_is_scored() {
    let config = SelectionConfig {
        candidates: vec![
            CandidateConfig::new("NB", ModelType::MultinomialNb { alpha: 1.0 }),
            CandidateConfig::new(
                "Boost",
                ModelType::AdaBoost {
                    n_estimators: 0,
                    learning_rate: 1.0,
                },
            ),
        ],
        ..SelectionConfig::default()
    };
    assert!(matches!(config.validate(), Err(SelectionError::Configuration(_))));
    match run(&customers(100), &config) {
        Err(SelectionError::Configuration(msg)) => assert!(msg.contains("Boost"), "{}", msg),
        other => panic!("expected a configuration error, got {:?}", other.map(|r| r.winner)),
    }
}

#[test]
fn gradient_boosted_one_vs_rest_candidate_runs() {
    let config = SelectionConfig {
        n_folds: 3,
        candidates: vec![CandidateConfig::new(
            "OneVsRest(GBDT)",
            ModelType::OneVsRest {
                estimator: BinaryModelType::GradientBoosting {
                    max_depth: 2,
                    num_boost_round: 10,
                    learning_rate: 0.3,
                },
            },
        )],
        ..SelectionConfig::default()
    };
    let report = run(&customers(60), &config).unwrap();
    assert_eq!(report.winner, "OneVsRest(GBDT)");
    assert_eq!(report.validation.total, 12);
}

#[test]
fn config_survives_a_json_round_trip() {
    let config = SelectionConfig::default();
    let json = serde_json::to_string_pretty(&config).unwrap();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();

    let loaded = load_config(file.path()).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn partial_config_falls_back_to_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(br#"{"n_folds": 5, "tie_break": "first_wins"}"#).unwrap();
    let loaded = load_config(file.path()).unwrap();
    assert_eq!(loaded.n_folds, 5);
    assert_eq!(loaded.train_fraction, 0.8);
    assert_eq!(loaded.candidates.len(), 4);
}

#[test]
fn loader_reads_and_encodes_a_csv_file() {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(file, "customer_id,recency,frequency,weeks_since_signup,status").unwrap();
    writeln!(file, "1,3,10,over 20,active").unwrap();
    writeln!(file, "2,40,1,5-10,churned").unwrap();
    writeln!(file, "3,5,8,over 20,active").unwrap();
    file.flush().unwrap();

    let ds = read_dataset(file.path(), &LoaderConfig::default()).unwrap();
    assert_eq!(ds.n_samples(), 3);
    assert_eq!(
        ds.feature_names,
        vec!["recency", "frequency", "weeks_since_signup_5-10", "weeks_since_signup_over 20"]
    );
    assert_eq!(ds.classes, vec!["active", "churned"]);
    assert_eq!(ds.labels, vec![0, 1, 0]);
}

#[test]
fn loader_honours_a_custom_delimiter() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "recency;frequency;weeks_since_signup;status\n1;2;3;a\n4;5;6;b\n").unwrap();
    let config = LoaderConfig {
        delimiter: ';',
        ..LoaderConfig::default()
    };
    let ds = read_dataset(file.path(), &config).unwrap();
    assert_eq!(ds.features.ncols(), 3);
}

#[test]
fn missing_file_reports_its_path() {
    let err = read_dataset("/nonexistent/customers.csv", &LoaderConfig::default()).unwrap_err();
    assert!(format!("{:#}", err).contains("/nonexistent/customers.csv"));
}
