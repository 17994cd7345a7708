use ndarray::ArrayView2;

use crate::error::{Result, SelectionError};
use crate::models::classifier_trait::Classifier;
use crate::stats::count_correct;

/// Accuracy of the refitted winner on the untouched validation segment.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationOutcome {
    pub name: String,
    pub correct: usize,
    pub total: usize,
    /// 100 * correct / total
    pub accuracy_pct: f64,
}

impl ValidationOutcome {
    /// Percentage with exactly two decimals, e.g. "85.00".
    pub fn formatted_accuracy(&self) -> String {
        format!("{:.2}", self.accuracy_pct)
    }
}

/// Fit `classifier` on the whole training segment and score it on validation.
pub fn validate(
    name: &str,
    classifier: &dyn Classifier,
    train_x: ArrayView2<f64>,
    train_y: &[usize],
    val_x: ArrayView2<f64>,
    val_y: &[usize],
) -> Result<ValidationOutcome> {
    if val_x.nrows() == 0 {
        return Err(SelectionError::data("validation segment is empty"));
    }
    if val_x.nrows() != val_y.len() {
        return Err(SelectionError::data(format!(
            "validation segment has {} feature rows but {} labels",
            val_x.nrows(),
            val_y.len()
        )));
    }

    let model = classifier.fit(train_x, train_y)?;
    let predictions = model.predict(val_x)?;
    if predictions.len() != val_y.len() {
        return Err(SelectionError::data(format!(
            "{} returned {} predictions for {} validation rows",
            name,
            predictions.len(),
            val_y.len()
        )));
    }

    let correct = count_correct(&predictions, val_y);
    let total = val_y.len();
    let outcome = ValidationOutcome {
        name: name.to_string(),
        correct,
        total,
        accuracy_pct: 100.0 * (correct as f64 / total as f64),
    };

    log::info!(
        "Winning algorithm: {}. Algorithm accuracy rate: {}%",
        name,
        outcome.formatted_accuracy()
    );
    Ok(outcome)
}
