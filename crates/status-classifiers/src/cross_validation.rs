//! k-fold cross-validation over the training segment.
//!
//! A `FoldPlan` is computed once from the training labels and reused for
//! every candidate, so all candidates are scored on identical folds.
use ndarray::{ArrayView2, Axis};
use rayon::prelude::*;

use crate::config::FoldStrategy;
use crate::error::{Result, SelectionError};
use crate::models::classifier_trait::Classifier;
use crate::stats::{accuracy, summarize_folds};

/// Assignment of every training row to exactly one test fold.
#[derive(Debug, Clone, PartialEq)]
pub struct FoldPlan {
    n_samples: usize,
    /// Test row indices per fold, ascending
    test_folds: Vec<Vec<usize>>,
}

impl FoldPlan {
    pub fn new(labels: &[usize], n_folds: usize, strategy: FoldStrategy) -> Result<Self> {
        match strategy {
            FoldStrategy::Stratified => FoldPlan::stratified(labels, n_folds),
            FoldStrategy::Contiguous => FoldPlan::contiguous(labels.len(), n_folds),
        }
    }

    fn check_fold_count(n_samples: usize, n_folds: usize) -> Result<()> {
        if n_folds < 2 {
            return Err(SelectionError::config(format!(
                "cross-validation needs at least 2 folds, got {}",
                n_folds
            )));
        }
        if n_folds > n_samples {
            return Err(SelectionError::config(format!(
                "cannot split {} training samples into {} folds",
                n_samples, n_folds
            )));
        }
        Ok(())
    }

    /// Consecutive blocks; the first `n_samples % n_folds` folds get one extra row.
    pub fn contiguous(n_samples: usize, n_folds: usize) -> Result<Self> {
        FoldPlan::check_fold_count(n_samples, n_folds)?;
        let base = n_samples / n_folds;
        let extra = n_samples % n_folds;

        let mut test_folds = Vec::with_capacity(n_folds);
        let mut start = 0;
        for fold in 0..n_folds {
            let size = base + usize::from(fold < extra);
            test_folds.push((start..start + size).collect());
            start += size;
        }
        Ok(FoldPlan {
            n_samples,
            test_folds,
        })
    }

    /// Stratified folds without shuffling.
    ///
    /// Classes are ranked by first appearance. The sorted labels are dealt
    /// round-robin into the folds to fix how many rows of each class every
    /// fold receives, then each class's rows are handed out to folds
    /// 0, 1, .. in their original order.
    pub fn stratified(labels: &[usize], n_folds: usize) -> Result<Self> {
        let n_samples = labels.len();
        FoldPlan::check_fold_count(n_samples, n_folds)?;

        let mut first_seen: Vec<usize> = Vec::new();
        let encoded: Vec<usize> = labels
            .iter()
            .map(|l| match first_seen.iter().position(|c| c == l) {
                Some(pos) => pos,
                None => {
                    first_seen.push(*l);
                    first_seen.len() - 1
                }
            })
            .collect();
        let n_classes = first_seen.len();

        let mut class_counts = vec![0usize; n_classes];
        for &c in &encoded {
            class_counts[c] += 1;
        }
        let max_count = class_counts.iter().copied().max().unwrap_or(0);
        let min_count = class_counts.iter().copied().min().unwrap_or(0);
        if n_folds > max_count {
            return Err(SelectionError::config(format!(
                "n_folds={} cannot be greater than the number of members in each class",
                n_folds
            )));
        }
        if n_folds > min_count {
            log::warn!(
                "The least populated class has only {} members, which is less than n_folds={}",
                min_count,
                n_folds
            );
        }

        let mut sorted = encoded.clone();
        sorted.sort_unstable();
        let mut allocation = vec![vec![0usize; n_classes]; n_folds];
        for (pos, &c) in sorted.iter().enumerate() {
            allocation[pos % n_folds][c] += 1;
        }

        let mut fold_of = vec![0usize; n_samples];
        for class in 0..n_classes {
            let folds_for_class = (0..n_folds)
                .flat_map(|fold| std::iter::repeat(fold).take(allocation[fold][class]));
            let members = (0..n_samples).filter(|&i| encoded[i] == class);
            for (row, fold) in members.zip(folds_for_class) {
                fold_of[row] = fold;
            }
        }

        let mut test_folds = vec![Vec::new(); n_folds];
        for (row, &fold) in fold_of.iter().enumerate() {
            test_folds[fold].push(row);
        }
        Ok(FoldPlan {
            n_samples,
            test_folds,
        })
    }

    pub fn n_folds(&self) -> usize {
        self.test_folds.len()
    }

    pub fn n_samples(&self) -> usize {
        self.n_samples
    }

    pub fn test_indices(&self, fold: usize) -> &[usize] {
        &self.test_folds[fold]
    }

    /// All rows outside the test fold, ascending.
    pub fn train_indices(&self, fold: usize) -> Vec<usize> {
        let test = &self.test_folds[fold];
        let mut train = Vec::with_capacity(self.n_samples - test.len());
        let mut next_test = test.iter().peekable();
        for row in 0..self.n_samples {
            if next_test.peek() == Some(&&row) {
                next_test.next();
            } else {
                train.push(row);
            }
        }
        train
    }
}

/// Per-fold accuracies of one candidate and their summary.
#[derive(Debug, Clone, PartialEq)]
pub struct CvScore {
    pub fold_scores: Vec<f64>,
    pub mean: f64,
    pub std_dev: f64,
}

impl CvScore {
    pub fn from_folds(fold_scores: Vec<f64>) -> Self {
        let (mean, std_dev) = summarize_folds(&fold_scores);
        CvScore {
            fold_scores,
            mean,
            std_dev,
        }
    }
}

/// Estimates generalization accuracy of a classifier on a training segment.
pub trait Evaluator {
    fn evaluate(
        &self,
        name: &str,
        classifier: &dyn Classifier,
        x: ArrayView2<f64>,
        y: &[usize],
    ) -> Result<CvScore>;
}

/// k-fold cross-validation scored by accuracy.
#[derive(Debug, Clone)]
pub struct CrossValidator {
    plan: FoldPlan,
    parallel: bool,
}

impl CrossValidator {
    pub fn new(plan: FoldPlan, parallel: bool) -> Self {
        CrossValidator { plan, parallel }
    }

    pub fn plan(&self) -> &FoldPlan {
        &self.plan
    }

    fn score_fold(
        &self,
        fold: usize,
        classifier: &dyn Classifier,
        x: ArrayView2<f64>,
        y: &[usize],
    ) -> Result<f64> {
        let train = self.plan.train_indices(fold);
        let test = self.plan.test_indices(fold);

        let x_train = x.select(Axis(0), &train);
        let y_train: Vec<usize> = train.iter().map(|&i| y[i]).collect();
        let x_test = x.select(Axis(0), test);
        let y_test: Vec<usize> = test.iter().map(|&i| y[i]).collect();

        let model = classifier.fit(x_train.view(), &y_train)?;
        let predictions = model.predict(x_test.view())?;
        accuracy(&predictions, &y_test)
    }
}

impl Evaluator for CrossValidator {
    fn evaluate(
        &self,
        name: &str,
        classifier: &dyn Classifier,
        x: ArrayView2<f64>,
        y: &[usize],
    ) -> Result<CvScore> {
        if x.nrows() != y.len() || y.len() != self.plan.n_samples() {
            return Err(SelectionError::data(format!(
                "fold plan covers {} rows but got {} feature rows and {} labels",
                self.plan.n_samples(),
                x.nrows(),
                y.len()
            )));
        }

        let folds = 0..self.plan.n_folds();
        let fold_scores: Vec<f64> = if self.parallel {
            folds
                .into_par_iter()
                .map(|fold| self.score_fold(fold, classifier, x, y))
                .collect::<Result<Vec<_>>>()?
        } else {
            folds
                .map(|fold| self.score_fold(fold, classifier, x, y))
                .collect::<Result<Vec<_>>>()?
        };

        // Logged after collection so parallel runs print in fold order.
        for (fold, score) in fold_scores.iter().enumerate() {
            log::debug!("{} fold {}: accuracy {}", name, fold, score);
        }

        let score = CvScore::from_folds(fold_scores);
        log::info!("Accuracy rate of {}: {}", name, score.mean);
        Ok(score)
    }
}
