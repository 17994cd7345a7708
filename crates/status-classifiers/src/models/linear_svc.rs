use ndarray::{Array1, ArrayView2};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::{Result, SelectionError};
use crate::models::classifier_trait::{BinaryClassifier, BinaryScorer};
use crate::models::utils::{check_fit_inputs, check_predict_width};

/// Linear support vector classifier with squared hinge loss.
///
/// Solved in the dual by coordinate descent (Hsieh et al., 2008). The
/// intercept is learned as the weight of a constant unit feature and is
/// regularized together with the other weights.
#[derive(Debug, Clone)]
pub struct LinearSvc {
    /// Inverse regularization strength
    pub c: f64,
    /// Stop when the projected-gradient spread falls below this
    pub tol: f64,
    /// Maximum number of passes over the training rows
    pub max_iter: usize,
    /// Seed for the per-pass coordinate shuffle
    pub seed: u64,
}

impl LinearSvc {
    pub fn new(c: f64, tol: f64, max_iter: usize, seed: u64) -> Self {
        LinearSvc {
            c,
            tol,
            max_iter,
            seed,
        }
    }
}

impl Default for LinearSvc {
    fn default() -> Self {
        LinearSvc::new(1.0, 1e-4, 10_000, 0)
    }
}

impl BinaryClassifier for LinearSvc {
    fn name(&self) -> &str {
        "LinearSVC"
    }

    fn fit_binary(&self, x: ArrayView2<f64>, y: &[bool]) -> Result<Box<dyn BinaryScorer>> {
        check_fit_inputs(self.name(), x, y)?;
        if !(self.c > 0.0) {
            return Err(SelectionError::config(format!("LinearSVC: C must be positive, got {}", self.c)));
        }

        let n_samples = x.nrows();
        let sign: Vec<f64> = y.iter().map(|&p| if p { 1.0 } else { -1.0 }).collect();
        let diag = 0.5 / self.c;
        let q_diag: Vec<f64> = x.rows().into_iter().map(|r| r.dot(&r) + 1.0 + diag).collect();

        let mut weights = Array1::<f64>::zeros(x.ncols());
        let mut bias = 0.0;
        let mut alpha = vec![0.0f64; n_samples];
        let mut order: Vec<usize> = (0..n_samples).collect();
        let mut rng = StdRng::seed_from_u64(self.seed);

        let mut converged = false;
        let mut passes = 0;
        while passes < self.max_iter {
            passes += 1;
            order.shuffle(&mut rng);

            let mut pg_max = f64::NEG_INFINITY;
            let mut pg_min = f64::INFINITY;
            for &i in &order {
                let row = x.row(i);
                let g = sign[i] * (weights.dot(&row) + bias) - 1.0 + diag * alpha[i];
                let pg = if alpha[i] == 0.0 { g.min(0.0) } else { g };
                pg_max = pg_max.max(pg);
                pg_min = pg_min.min(pg);

                if pg.abs() > 1e-12 {
                    let previous = alpha[i];
                    alpha[i] = (previous - g / q_diag[i]).max(0.0);
                    let step = (alpha[i] - previous) * sign[i];
                    weights.scaled_add(step, &row);
                    bias += step;
                }
            }

            if pg_max - pg_min <= self.tol {
                converged = true;
                break;
            }
        }

        if converged {
            log::trace!("LinearSVC converged after {} passes", passes);
        } else {
            log::warn!(
                "LinearSVC failed to converge in {} passes; consider scaling the features",
                self.max_iter
            );
        }

        if !bias.is_finite() || weights.iter().any(|w| !w.is_finite()) {
            return Err(SelectionError::fit(self.name(), "non-finite weights after training"));
        }

        Ok(Box::new(LinearScorer { weights, bias }))
    }
}

/// Fitted hyperplane `w . x + b`.
#[derive(Debug, Clone)]
pub struct LinearScorer {
    pub weights: Array1<f64>,
    pub bias: f64,
}

impl BinaryScorer for LinearScorer {
    fn decision_function(&self, x: ArrayView2<f64>) -> Result<Vec<f64>> {
        check_predict_width("LinearSVC", x, self.weights.len())?;
        Ok((x.dot(&self.weights) + self.bias).to_vec())
    }
}
