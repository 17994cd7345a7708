//! Data structures for labeled customer-status datasets.
//!
//! `Dataset` keeps the feature matrix and the label vector aligned row by row,
//! and `split` carves it into an order-preserving training/validation pair.
use ndarray::{s, Array2, ArrayView2};

use crate::error::{Result, SelectionError};

#[derive(Debug, Clone)]
pub struct Dataset {
    /// Encoded features, shape (n_samples, n_features)
    pub features: Array2<f64>,
    /// Class index per row, indexing into `classes`
    pub labels: Vec<usize>,
    /// Column names after encoding
    pub feature_names: Vec<String>,
    /// Distinct label values, sorted
    pub classes: Vec<String>,
}

impl Dataset {
    pub fn new(
        features: Array2<f64>,
        labels: Vec<usize>,
        feature_names: Vec<String>,
        classes: Vec<String>,
    ) -> Result<Self> {
        if features.nrows() != labels.len() {
            return Err(SelectionError::data(format!(
                "feature matrix has {} rows but {} labels were given",
                features.nrows(),
                labels.len()
            )));
        }
        if features.ncols() != feature_names.len() {
            return Err(SelectionError::data(format!(
                "feature matrix has {} columns but {} feature names were given",
                features.ncols(),
                feature_names.len()
            )));
        }
        if let Some(&bad) = labels.iter().find(|&&l| l >= classes.len()) {
            return Err(SelectionError::data(format!(
                "label index {} is out of range for {} classes",
                bad,
                classes.len()
            )));
        }
        Ok(Dataset {
            features,
            labels,
            feature_names,
            classes,
        })
    }

    /// Build a dataset from string labels, assigning class indices in sorted order.
    pub fn from_labels<S: AsRef<str>>(
        features: Array2<f64>,
        labels: &[S],
        feature_names: Vec<String>,
    ) -> Result<Self> {
        let mut classes: Vec<String> = labels.iter().map(|l| l.as_ref().to_string()).collect();
        classes.sort();
        classes.dedup();
        let encoded = labels
            .iter()
            .map(|l| {
                classes
                    .binary_search_by(|c| c.as_str().cmp(l.as_ref()))
                    .unwrap_or_default()
            })
            .collect();
        Dataset::new(features, encoded, feature_names, classes)
    }

    pub fn n_samples(&self) -> usize {
        self.labels.len()
    }

    pub fn log_input_data_summary(&self) {
        log::info!(
            "{} samples, {} encoded feature columns, {} classes",
            self.n_samples(),
            self.features.ncols(),
            self.classes.len()
        );
        for (idx, class) in self.classes.iter().enumerate() {
            log::debug!(
                "class {:?}: {} samples",
                class,
                self.labels.iter().filter(|&&l| l == idx).count()
            );
        }
    }
}

/// Training and validation segments borrowed from a `Dataset`.
#[derive(Debug, Clone, Copy)]
pub struct Split<'a> {
    pub train_features: ArrayView2<'a, f64>,
    pub train_labels: &'a [usize],
    pub val_features: ArrayView2<'a, f64>,
    pub val_labels: &'a [usize],
}

impl Split<'_> {
    pub fn n_train(&self) -> usize {
        self.train_labels.len()
    }

    pub fn n_validation(&self) -> usize {
        self.val_labels.len()
    }
}

/// Number of rows that land in the training segment.
///
/// A fraction of exactly 1.0 is accepted here and rejected by `split` as an
/// empty validation segment.
pub fn split_index(n_samples: usize, train_fraction: f64) -> Result<usize> {
    if !(train_fraction > 0.0 && train_fraction <= 1.0) {
        return Err(SelectionError::config(format!(
            "train_fraction must lie in (0, 1], got {}",
            train_fraction
        )));
    }
    Ok((train_fraction * n_samples as f64).floor() as usize)
}

/// Partition `dataset` at `floor(train_fraction * N)` without reordering rows.
pub fn split(dataset: &Dataset, train_fraction: f64) -> Result<Split<'_>> {
    let n = dataset.n_samples();
    if dataset.features.nrows() != n {
        return Err(SelectionError::data("features and labels are misaligned"));
    }
    let idx = split_index(n, train_fraction)?;
    if idx == 0 {
        return Err(SelectionError::data(format!(
            "empty training segment: {} samples with train_fraction {}",
            n, train_fraction
        )));
    }
    if idx == n {
        return Err(SelectionError::data(format!(
            "empty validation segment: {} samples with train_fraction {}",
            n, train_fraction
        )));
    }

    log::debug!("Splitting {} samples into {} training and {} validation rows", n, idx, n - idx);

    Ok(Split {
        train_features: dataset.features.slice(s![..idx, ..]),
        train_labels: &dataset.labels[..idx],
        val_features: dataset.features.slice(s![idx.., ..]),
        val_labels: &dataset.labels[idx..],
    })
}
