use std::cmp::Ordering;

use ndarray::{ArrayView1, ArrayView2, Axis};

use crate::error::{Result, SelectionError};
use crate::models::classifier_trait::{Classifier, FittedModel};
use crate::models::utils::{argmax, check_fit_inputs, check_predict_width, unique_classes};

/// Feature values closer than this are treated as equal when placing thresholds.
const FEATURE_THRESHOLD: f64 = 1e-7;

/// Multiclass AdaBoost (SAMME) over depth-one decision trees.
#[derive(Debug, Clone)]
pub struct AdaBoost {
    pub n_estimators: usize,
    pub learning_rate: f64,
}

impl AdaBoost {
    pub fn new(n_estimators: usize, learning_rate: f64) -> Self {
        AdaBoost {
            n_estimators,
            learning_rate,
        }
    }
}

impl Default for AdaBoost {
    fn default() -> Self {
        AdaBoost::new(50, 1.0)
    }
}

/// A single split; `left`/`right` index into the fitted class list.
#[derive(Debug, Clone, PartialEq)]
struct Stump {
    feature: Option<usize>,
    threshold: f64,
    left: usize,
    right: usize,
}

impl Stump {
    fn predict_row(&self, row: ArrayView1<f64>) -> usize {
        match self.feature {
            Some(f) if row[f] > self.threshold => self.right,
            _ => self.left,
        }
    }
}

fn gini(counts: &[f64], total: f64) -> f64 {
    if total <= 0.0 {
        return 0.0;
    }
    1.0 - counts.iter().map(|c| (c / total).powi(2)).sum::<f64>()
}

/// Fit the weighted-Gini optimal stump.
fn fit_stump(x: ArrayView2<f64>, y: &[usize], weights: &[f64], n_classes: usize) -> Stump {
    let mut totals = vec![0.0f64; n_classes];
    for (&k, &w) in y.iter().zip(weights) {
        totals[k] += w;
    }
    let total_weight: f64 = totals.iter().sum();

    let majority = argmax(&totals);
    let mut best = Stump {
        feature: None,
        threshold: 0.0,
        left: majority,
        right: majority,
    };
    let mut best_impurity = total_weight * gini(&totals, total_weight);
    if best_impurity <= 0.0 {
        return best;
    }

    let n_samples = x.nrows();
    let mut order: Vec<usize> = (0..n_samples).collect();
    for (f, column) in x.axis_iter(Axis(1)).enumerate() {
        order.sort_by(|&a, &b| column[a].partial_cmp(&column[b]).unwrap_or(Ordering::Equal));

        let mut left = vec![0.0f64; n_classes];
        let mut right = totals.clone();
        for pos in 0..n_samples - 1 {
            let i = order[pos];
            left[y[i]] += weights[i];
            right[y[i]] -= weights[i];

            let current = column[i];
            let next = column[order[pos + 1]];
            if next <= current + FEATURE_THRESHOLD {
                continue;
            }

            let w_left: f64 = left.iter().sum();
            let w_right: f64 = right.iter().sum();
            let impurity = w_left * gini(&left, w_left) + w_right * gini(&right, w_right);
            if impurity < best_impurity - 1e-12 {
                best_impurity = impurity;
                best = Stump {
                    feature: Some(f),
                    threshold: current + (next - current) / 2.0,
                    left: argmax(&left),
                    right: argmax(&right),
                };
            }
        }
    }

    best
}

impl Classifier for AdaBoost {
    fn name(&self) -> &str {
        "AdaBoostClassifier"
    }

    fn fit(&self, x: ArrayView2<f64>, y: &[usize]) -> Result<Box<dyn FittedModel>> {
        check_fit_inputs(self.name(), x, y)?;
        if self.n_estimators == 0 || !(self.learning_rate > 0.0) {
            return Err(SelectionError::config(format!(
                "AdaBoost: need n_estimators > 0 and learning_rate > 0, got {} and {}",
                self.n_estimators, self.learning_rate
            )));
        }

        let classes = unique_classes(y);
        let n_classes = classes.len();
        let encoded: Vec<usize> = y
            .iter()
            .map(|l| classes.binary_search(l).unwrap_or_default())
            .collect();

        let n_samples = x.nrows();
        let mut weights = vec![1.0 / n_samples as f64; n_samples];
        let mut stumps = Vec::with_capacity(self.n_estimators);
        let mut stump_weights = Vec::with_capacity(self.n_estimators);

        for round in 0..self.n_estimators {
            let stump = fit_stump(x, &encoded, &weights, n_classes);
            let incorrect: Vec<bool> = x
                .axis_iter(Axis(0))
                .zip(&encoded)
                .map(|(row, &k)| stump.predict_row(row) != k)
                .collect();

            let weight_sum: f64 = weights.iter().sum();
            let error = incorrect
                .iter()
                .zip(&weights)
                .filter(|(miss, _)| **miss)
                .map(|(_, w)| w)
                .sum::<f64>()
                / weight_sum;

            if error <= 0.0 {
                log::trace!("AdaBoost: perfect stump at round {}", round);
                stumps.push(stump);
                stump_weights.push(1.0);
                break;
            }

            if error >= 1.0 - 1.0 / n_classes as f64 {
                if stumps.is_empty() {
                    return Err(SelectionError::fit(
                        self.name(),
                        "first weak learner is no better than chance; ensemble cannot be fit",
                    ));
                }
                break;
            }

            let alpha = self.learning_rate
                * (((1.0 - error) / error).ln() + ((n_classes - 1) as f64).ln());
            stumps.push(stump);
            stump_weights.push(alpha);

            for (w, &miss) in weights.iter_mut().zip(&incorrect) {
                if miss {
                    *w *= alpha.exp();
                }
            }
            let total: f64 = weights.iter().sum();
            if !(total.is_finite() && total > 0.0) {
                log::warn!("AdaBoost: sample weights degenerated at round {}", round);
                break;
            }
            weights.iter_mut().for_each(|w| *w /= total);
        }

        log::trace!("AdaBoost: kept {} weak learners", stumps.len());

        Ok(Box::new(FittedAdaBoost {
            classes,
            stumps,
            stump_weights,
            n_features: x.ncols(),
        }))
    }
}

#[derive(Debug, Clone)]
pub struct FittedAdaBoost {
    classes: Vec<usize>,
    stumps: Vec<Stump>,
    stump_weights: Vec<f64>,
    n_features: usize,
}

impl FittedModel for FittedAdaBoost {
    fn predict(&self, x: ArrayView2<f64>) -> Result<Vec<usize>> {
        check_predict_width("AdaBoostClassifier", x, self.n_features)?;
        Ok(x.axis_iter(Axis(0))
            .map(|row| {
                let mut votes = vec![0.0f64; self.classes.len()];
                for (stump, &alpha) in self.stumps.iter().zip(&self.stump_weights) {
                    votes[stump.predict_row(row)] += alpha;
                }
                self.classes[argmax(&votes)]
            })
            .collect())
    }
}
