use ndarray::ArrayView2;

use crate::config::TieBreak;
use crate::cross_validation::{CvScore, Evaluator};
use crate::error::{Result, SelectionError};
use crate::models::factory::Candidate;

/// Cross-validated score of one candidate, in evaluation order.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreEntry {
    pub name: String,
    /// Position of the candidate in the roster
    pub candidate_index: usize,
    pub score: CvScore,
}

impl ScoreEntry {
    pub fn mean(&self) -> f64 {
        self.score.mean
    }
}

/// Index of the entry with the highest mean score.
///
/// With `TieBreak::LastWins` an entry whose mean equals the current best
/// replaces it, so the last of several equal maxima is returned.
/// `TieBreak::FirstWins` keeps the earliest one instead.
pub fn select_winner(entries: &[ScoreEntry], tie_break: TieBreak) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (idx, entry) in entries.iter().enumerate() {
        best = match best {
            None => Some(idx),
            Some(current) => {
                let incumbent = entries[current].mean();
                let replaces = entry.mean() > incumbent
                    || (entry.mean() == incumbent && tie_break == TieBreak::LastWins);
                Some(if replaces { idx } else { current })
            }
        };
    }
    best
}

/// Outcome of running the evaluator over every candidate.
#[derive(Debug, Clone)]
pub struct Selection {
    pub entries: Vec<ScoreEntry>,
    winner: usize,
}

impl Selection {
    pub fn winner(&self) -> &ScoreEntry {
        &self.entries[self.winner]
    }

    pub fn winning_candidate<'a>(&self, candidates: &'a [Candidate]) -> &'a Candidate {
        &candidates[self.winner().candidate_index]
    }
}

/// Scores each candidate with an `Evaluator` and keeps the best one.
pub struct ModelSelector<E> {
    evaluator: E,
    tie_break: TieBreak,
}

impl<E: Evaluator> ModelSelector<E> {
    pub fn new(evaluator: E, tie_break: TieBreak) -> Self {
        ModelSelector {
            evaluator,
            tie_break,
        }
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Evaluate `candidates` in order on the training segment and pick the winner.
    ///
    /// No model is kept fitted; the winner is refitted by the final validator.
    pub fn select(
        &self,
        candidates: &[Candidate],
        x: ArrayView2<f64>,
        y: &[usize],
    ) -> Result<Selection> {
        if candidates.is_empty() {
            return Err(SelectionError::config("no candidate classifiers to select from"));
        }

        let mut entries = Vec::with_capacity(candidates.len());
        for (candidate_index, candidate) in candidates.iter().enumerate() {
            let score = self
                .evaluator
                .evaluate(&candidate.name, candidate.classifier.as_ref(), x, y)?;
            if score.mean.is_nan() {
                return Err(SelectionError::fit(
                    candidate.name.clone(),
                    "cross-validated score is NaN",
                ));
            }
            entries.push(ScoreEntry {
                name: candidate.name.clone(),
                candidate_index,
                score,
            });
        }

        let winner = select_winner(&entries, self.tie_break)
            .ok_or_else(|| SelectionError::config("no candidate produced a score"))?;
        log::info!("Winner: {}", entries[winner].name);

        Ok(Selection { entries, winner })
    }
}
