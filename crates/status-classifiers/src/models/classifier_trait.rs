use ndarray::ArrayView2;

use crate::error::Result;

/// An unfitted classifier configuration.
///
/// `fit` never mutates the configuration: every call produces an
/// independent `FittedModel`, so one candidate can be fitted once per fold
/// and once more on the whole training segment.
pub trait Classifier: Send + Sync {
    /// Human readable model name used in logs and errors
    fn name(&self) -> &str;

    /// Fit on `x` (n_samples x n_features) with class indices `y`.
    fn fit(&self, x: ArrayView2<f64>, y: &[usize]) -> Result<Box<dyn FittedModel>>;
}

/// Parameters learned by `Classifier::fit`.
pub trait FittedModel: Send + Sync {
    /// Predict one class index per row of `x`.
    fn predict(&self, x: ArrayView2<f64>) -> Result<Vec<usize>>;
}

/// A two-class estimator used by the multiclass wrappers.
pub trait BinaryClassifier: Send + Sync {
    fn name(&self) -> &str;

    /// Fit with `y[i] == true` marking the positive class.
    fn fit_binary(&self, x: ArrayView2<f64>, y: &[bool]) -> Result<Box<dyn BinaryScorer>>;
}

/// Decision function of a fitted binary estimator; values > 0 mean positive.
pub trait BinaryScorer: Send + Sync {
    fn decision_function(&self, x: ArrayView2<f64>) -> Result<Vec<f64>>;
}
