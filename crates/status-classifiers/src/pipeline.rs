use crate::config::SelectionConfig;
use crate::cross_validation::{CrossValidator, FoldPlan};
use crate::data_handling::{split, Dataset};
use crate::error::Result;
use crate::models::factory::build_candidates;
use crate::report::SelectionReport;
use crate::selection::ModelSelector;
use crate::stats::majority_baseline;
use crate::validation::validate;

/// Split, cross-validate every candidate, refit the winner and compare it
/// with the majority-class baseline.
///
/// Configuration problems, including a fold count the training segment
/// cannot support, surface before any candidate is fitted.
pub fn run(dataset: &Dataset, config: &SelectionConfig) -> Result<SelectionReport> {
    config.validate()?;
    dataset.log_input_data_summary();

    let segments = split(dataset, config.train_fraction)?;
    log::info!(
        "Training on {} rows, validating on {} rows",
        segments.n_train(),
        segments.n_validation()
    );

    let candidates = build_candidates(&config.candidates);
    let plan = FoldPlan::new(segments.train_labels, config.n_folds, config.fold_strategy)?;
    let selector = ModelSelector::new(
        CrossValidator::new(plan, config.parallel_folds),
        config.tie_break,
    );
    log::info!(
        "Cross-validating {} candidates over {} folds",
        candidates.len(),
        selector.evaluator().plan().n_folds()
    );

    let selection = selector.select(&candidates, segments.train_features, segments.train_labels)?;
    let winner = selection.winning_candidate(&candidates);

    let outcome = validate(
        &winner.name,
        winner.classifier.as_ref(),
        segments.train_features,
        segments.train_labels,
        segments.val_features,
        segments.val_labels,
    )?;

    let baseline_pct = majority_baseline(segments.val_labels)?;
    log::info!("Baseline accuracy rate: {:.2}%", baseline_pct);

    let report = SelectionReport {
        winner: winner.name.clone(),
        entries: selection.entries,
        validation: outcome,
        baseline_pct,
        n_train: segments.n_train(),
        validation_count: segments.val_features.nrows(),
    };
    report.log_summary();
    Ok(report)
}
