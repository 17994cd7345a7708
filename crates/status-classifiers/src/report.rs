//! Console summary of a selection run.
use std::fmt;

use crate::selection::ScoreEntry;
use crate::validation::ValidationOutcome;

/// Everything a run reports, in the order it is printed.
#[derive(Debug, Clone)]
pub struct SelectionReport {
    pub entries: Vec<ScoreEntry>,
    pub winner: String,
    pub validation: ValidationOutcome,
    /// Majority-class accuracy on the validation labels, in percent
    pub baseline_pct: f64,
    pub n_train: usize,
    pub validation_count: usize,
}

impl SelectionReport {
    pub fn log_summary(&self) {
        log::info!(
            "Selected {} out of {} candidates using {} training rows",
            self.winner,
            self.entries.len(),
            self.n_train
        );
        for entry in &self.entries {
            log::debug!(
                "{}: mean {:.4} (sd {:.4}) over {} folds",
                entry.name,
                entry.score.mean,
                entry.score.std_dev,
                entry.score.fold_scores.len()
            );
        }
    }
}

impl fmt::Display for SelectionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "Accuracy rate of {}: {}", entry.name, entry.score.mean)?;
        }
        writeln!(f, "Winner: {}", self.winner)?;
        writeln!(
            f,
            "Winning algorithm: {}. Algorithm accuracy rate: {}%",
            self.validation.name,
            self.validation.formatted_accuracy()
        )?;
        writeln!(f, "Baseline accuracy rate: {:.2}%", self.baseline_pct)?;
        write!(f, "Total elements tested: {}", self.validation_count)
    }
}
