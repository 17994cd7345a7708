use gbdt::config::Config;
use gbdt::decision_tree::{Data, DataVec};
use gbdt::gradient_boost::GBDT;
use ndarray::ArrayView2;

use crate::error::{Result, SelectionError};
use crate::models::classifier_trait::{BinaryClassifier, BinaryScorer};
use crate::models::utils::{check_fit_inputs, check_predict_width};

/// Gradient Boosting Decision Tree (GBDT) binary estimator.
///
/// Trees are boosted with squared-error loss on +1/-1 targets, so the raw
/// ensemble output is a decision value thresholded at zero.
#[derive(Debug, Clone)]
pub struct GradientBoosting {
    pub max_depth: u32,
    pub num_boost_round: u32,
    pub learning_rate: f32,
}

impl GradientBoosting {
    pub fn new(max_depth: u32, num_boost_round: u32, learning_rate: f32) -> Self {
        GradientBoosting {
            max_depth,
            num_boost_round,
            learning_rate,
        }
    }
}

fn to_rows(x: ArrayView2<f64>) -> Vec<Vec<f32>> {
    x.rows()
        .into_iter()
        .map(|r| r.iter().map(|&v| v as f32).collect())
        .collect()
}

impl BinaryClassifier for GradientBoosting {
    fn name(&self) -> &str {
        "GradientBoosting"
    }

    fn fit_binary(&self, x: ArrayView2<f64>, y: &[bool]) -> Result<Box<dyn BinaryScorer>> {
        check_fit_inputs(self.name(), x, y)?;
        if self.num_boost_round == 0 {
            return Err(SelectionError::config("GradientBoosting: num_boost_round must be positive"));
        }

        let feature_size = x.ncols();
        let mut config = Config::new();
        config.set_feature_size(feature_size);
        config.set_shrinkage(self.learning_rate);
        config.set_max_depth(self.max_depth);
        config.set_iterations(self.num_boost_round as usize);
        config.set_debug(false);
        config.set_training_optimization_level(2);
        config.set_loss("SquaredError");

        let mut model = GBDT::new(&config);

        let mut train_x = DataVec::new();
        for (row, &label) in to_rows(x).into_iter().zip(y) {
            let target = if label { 1.0 } else { -1.0 };
            train_x.push(Data::new_training_data(row, 1.0, target, None));
        }

        model.fit(&mut train_x);

        Ok(Box::new(GradientBoostingScorer { model, feature_size }))
    }
}

pub struct GradientBoostingScorer {
    model: GBDT,
    feature_size: usize,
}

impl BinaryScorer for GradientBoostingScorer {
    fn decision_function(&self, x: ArrayView2<f64>) -> Result<Vec<f64>> {
        check_predict_width("GradientBoosting", x, self.feature_size)?;
        let mut test_x = DataVec::new();
        for row in to_rows(x) {
            test_x.push(Data::new_test_data(row, None));
        }
        let predictions = self.model.predict(&test_x);
        if predictions.iter().any(|p| !p.is_finite()) {
            return Err(SelectionError::fit("GradientBoosting", "non-finite ensemble output"));
        }
        Ok(predictions.into_iter().map(f64::from).collect())
    }
}
