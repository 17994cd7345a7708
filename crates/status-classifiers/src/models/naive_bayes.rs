use ndarray::{Array1, Array2, ArrayView2, Axis};

use crate::error::{Result, SelectionError};
use crate::models::classifier_trait::{Classifier, FittedModel};
use crate::models::utils::{argmax, check_fit_inputs, check_predict_width, unique_classes};

const MIN_ALPHA: f64 = 1e-10;

/// Naive Bayes over count-like features with additive smoothing.
#[derive(Debug, Clone)]
pub struct MultinomialNb {
    pub alpha: f64,
}

impl MultinomialNb {
    pub fn new(alpha: f64) -> Self {
        MultinomialNb { alpha }
    }
}

impl Default for MultinomialNb {
    fn default() -> Self {
        MultinomialNb::new(1.0)
    }
}

impl Classifier for MultinomialNb {
    fn name(&self) -> &str {
        "MultinomialNB"
    }

    fn fit(&self, x: ArrayView2<f64>, y: &[usize]) -> Result<Box<dyn FittedModel>> {
        check_fit_inputs(self.name(), x, y)?;
        if x.iter().any(|&v| v < 0.0) {
            return Err(SelectionError::fit(self.name(), "negative feature values are not counts"));
        }
        if self.alpha < 0.0 {
            return Err(SelectionError::config(format!(
                "MultinomialNB: alpha must be non-negative, got {}",
                self.alpha
            )));
        }
        let alpha = if self.alpha < MIN_ALPHA {
            log::warn!("MultinomialNB: alpha too small, using {}", MIN_ALPHA);
            MIN_ALPHA
        } else {
            self.alpha
        };

        let classes = unique_classes(y);
        let n_features = x.ncols();
        let mut feature_count = Array2::<f64>::zeros((classes.len(), n_features));
        let mut class_count = vec![0usize; classes.len()];

        for (row, &label) in x.axis_iter(Axis(0)).zip(y) {
            let k = classes.binary_search(&label).unwrap_or_default();
            class_count[k] += 1;
            let mut counts = feature_count.row_mut(k);
            counts += &row;
        }

        let mut feature_log_prob = feature_count.mapv(|c| c + alpha);
        for mut counts in feature_log_prob.axis_iter_mut(Axis(0)) {
            let total: f64 = counts.sum();
            counts.mapv_inplace(|c| c.ln() - total.ln());
        }

        let n = y.len() as f64;
        let class_log_prior: Array1<f64> = class_count
            .iter()
            .map(|&c| (c as f64).ln() - n.ln())
            .collect();

        Ok(Box::new(FittedMultinomialNb {
            classes,
            feature_log_prob,
            class_log_prior,
        }))
    }
}

#[derive(Debug, Clone)]
pub struct FittedMultinomialNb {
    classes: Vec<usize>,
    /// Shape (n_classes, n_features)
    feature_log_prob: Array2<f64>,
    class_log_prior: Array1<f64>,
}

impl FittedMultinomialNb {
    /// Unnormalized log posterior, shape (n_samples, n_classes).
    pub fn joint_log_likelihood(&self, x: ArrayView2<f64>) -> Array2<f64> {
        x.dot(&self.feature_log_prob.t()) + &self.class_log_prior
    }
}

impl FittedModel for FittedMultinomialNb {
    fn predict(&self, x: ArrayView2<f64>) -> Result<Vec<usize>> {
        check_predict_width("MultinomialNB", x, self.feature_log_prob.ncols())?;
        let jll = self.joint_log_likelihood(x);
        Ok(jll
            .axis_iter(Axis(0))
            .map(|row| self.classes[argmax(&row.to_vec())])
            .collect())
    }
}
