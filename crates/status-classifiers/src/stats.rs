use statrs::statistics::Statistics;

use crate::error::{Result, SelectionError};

/// Fraction of positions where `predicted` matches `truth`, in [0, 1].
pub fn accuracy(predicted: &[usize], truth: &[usize]) -> Result<f64> {
    if predicted.len() != truth.len() {
        return Err(SelectionError::data(format!(
            "{} predictions for {} labels",
            predicted.len(),
            truth.len()
        )));
    }
    if truth.is_empty() {
        return Err(SelectionError::data("cannot score an empty label set"));
    }
    let correct = count_correct(predicted, truth);
    Ok(correct as f64 / truth.len() as f64)
}

pub fn count_correct(predicted: &[usize], truth: &[usize]) -> usize {
    predicted.iter().zip(truth).filter(|(p, t)| p == t).count()
}

/// Accuracy (percent) of always answering the most frequent label.
pub fn majority_baseline(labels: &[usize]) -> Result<f64> {
    if labels.is_empty() {
        return Err(SelectionError::data("baseline requires at least one validation label"));
    }
    let n_classes = labels.iter().copied().max().unwrap_or(0) + 1;
    let mut counts = vec![0usize; n_classes];
    for &l in labels {
        counts[l] += 1;
    }
    let max_frequency = counts.into_iter().max().unwrap_or(0);
    Ok(100.0 * (max_frequency as f64 / labels.len() as f64))
}

/// Arithmetic mean and sample standard deviation of per-fold scores.
///
/// The standard deviation is NaN for a single fold.
pub fn summarize_folds(fold_scores: &[f64]) -> (f64, f64) {
    let mean = fold_scores.iter().sum::<f64>() / fold_scores.len() as f64;
    let std_dev = fold_scores.iter().std_dev();
    (mean, std_dev)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_of_three_to_one_is_seventy_five() {
        let pct = majority_baseline(&[0, 0, 0, 1]).unwrap();
        assert!((pct - 75.0).abs() < 1e-12);
        assert_eq!(format!("{:.2}", pct), "75.00");
    }

    #[test]
    fn baseline_of_empty_labels_is_data_error() {
        assert!(matches!(majority_baseline(&[]), Err(SelectionError::Data(_))));
    }

    #[test]
    fn accuracy_counts_matches() {
        let acc = accuracy(&[0, 1, 2, 2], &[0, 1, 1, 2]).unwrap();
        assert!((acc - 0.75).abs() < 1e-12);
    }

    #[test]
    fn accuracy_rejects_length_mismatch() {
        assert!(accuracy(&[0, 1], &[0]).is_err());
    }

    #[test]
    fn summarize_folds_mean_and_spread() {
        let (mean, sd) = summarize_folds(&[0.5, 1.0, 0.75]);
        assert!((mean - 0.75).abs() < 1e-12);
        assert!((sd - 0.25).abs() < 1e-12);
    }
}
