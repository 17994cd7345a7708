//! One-vs-rest and one-vs-one reductions from multiclass to binary problems.
use ndarray::{Array2, ArrayView2, Axis};

use crate::error::Result;
use crate::models::classifier_trait::{BinaryClassifier, BinaryScorer, Classifier, FittedModel};
use crate::models::utils::{argmax, check_fit_inputs, unique_classes};

/// Always answers the single class seen during training.
struct ConstantModel {
    class: usize,
}

impl FittedModel for ConstantModel {
    fn predict(&self, x: ArrayView2<f64>) -> Result<Vec<usize>> {
        Ok(vec![self.class; x.nrows()])
    }
}

/// One binary estimator per class, each separating that class from all others.
pub struct OneVsRest<B> {
    name: String,
    estimator: B,
}

impl<B: BinaryClassifier> OneVsRest<B> {
    pub fn new(estimator: B) -> Self {
        OneVsRest {
            name: format!("OneVsRest({})", estimator.name()),
            estimator,
        }
    }
}

impl<B: BinaryClassifier> Classifier for OneVsRest<B> {
    fn name(&self) -> &str {
        &self.name
    }

    fn fit(&self, x: ArrayView2<f64>, y: &[usize]) -> Result<Box<dyn FittedModel>> {
        check_fit_inputs(&self.name, x, y)?;
        let classes = unique_classes(y);

        match classes.len() {
            1 => Ok(Box::new(ConstantModel { class: classes[0] })),
            // A single scorer suffices for two classes: positive means `classes[1]`.
            2 => {
                let positive: Vec<bool> = y.iter().map(|&l| l == classes[1]).collect();
                let scorer = self.estimator.fit_binary(x, &positive)?;
                Ok(Box::new(FittedOneVsRest {
                    classes,
                    scorers: vec![scorer],
                }))
            }
            _ => {
                let scorers = classes
                    .iter()
                    .map(|&c| {
                        let positive: Vec<bool> = y.iter().map(|&l| l == c).collect();
                        self.estimator.fit_binary(x, &positive)
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(Box::new(FittedOneVsRest { classes, scorers }))
            }
        }
    }
}

struct FittedOneVsRest {
    classes: Vec<usize>,
    scorers: Vec<Box<dyn BinaryScorer>>,
}

impl FittedModel for FittedOneVsRest {
    fn predict(&self, x: ArrayView2<f64>) -> Result<Vec<usize>> {
        if self.scorers.len() == 1 {
            let scores = self.scorers[0].decision_function(x)?;
            return Ok(scores
                .into_iter()
                .map(|s| if s > 0.0 { self.classes[1] } else { self.classes[0] })
                .collect());
        }

        let mut scores = Array2::<f64>::zeros((x.nrows(), self.classes.len()));
        for (k, scorer) in self.scorers.iter().enumerate() {
            for (i, s) in scorer.decision_function(x)?.into_iter().enumerate() {
                scores[[i, k]] = s;
            }
        }
        Ok(scores
            .axis_iter(Axis(0))
            .map(|row| self.classes[argmax(&row.to_vec())])
            .collect())
    }
}

/// One binary estimator per pair of classes, combined by voting.
pub struct OneVsOne<B> {
    name: String,
    estimator: B,
}

impl<B: BinaryClassifier> OneVsOne<B> {
    pub fn new(estimator: B) -> Self {
        OneVsOne {
            name: format!("OneVsOne({})", estimator.name()),
            estimator,
        }
    }
}

impl<B: BinaryClassifier> Classifier for OneVsOne<B> {
    fn name(&self) -> &str {
        &self.name
    }

    fn fit(&self, x: ArrayView2<f64>, y: &[usize]) -> Result<Box<dyn FittedModel>> {
        check_fit_inputs(&self.name, x, y)?;
        let classes = unique_classes(y);
        if classes.len() == 1 {
            return Ok(Box::new(ConstantModel { class: classes[0] }));
        }

        let mut pairs = Vec::with_capacity(classes.len() * (classes.len() - 1) / 2);
        for i in 0..classes.len() {
            for j in (i + 1)..classes.len() {
                let rows: Vec<usize> = y
                    .iter()
                    .enumerate()
                    .filter_map(|(r, &l)| (l == classes[i] || l == classes[j]).then_some(r))
                    .collect();
                let sub_x = x.select(Axis(0), &rows);
                let positive: Vec<bool> = rows.iter().map(|&r| y[r] == classes[j]).collect();
                let scorer = self.estimator.fit_binary(sub_x.view(), &positive)?;
                pairs.push((i, j, scorer));
            }
        }

        Ok(Box::new(FittedOneVsOne { classes, pairs }))
    }
}

struct FittedOneVsOne {
    classes: Vec<usize>,
    pairs: Vec<(usize, usize, Box<dyn BinaryScorer>)>,
}

impl FittedModel for FittedOneVsOne {
    fn predict(&self, x: ArrayView2<f64>) -> Result<Vec<usize>> {
        let n_classes = self.classes.len();
        let mut votes = Array2::<f64>::zeros((x.nrows(), n_classes));
        let mut confidences = Array2::<f64>::zeros((x.nrows(), n_classes));

        for (i, j, scorer) in &self.pairs {
            for (r, s) in scorer.decision_function(x)?.into_iter().enumerate() {
                if s > 0.0 {
                    votes[[r, *j]] += 1.0;
                } else {
                    votes[[r, *i]] += 1.0;
                }
                confidences[[r, *i]] -= s;
                confidences[[r, *j]] += s;
            }
        }

        // Scaled confidences stay below 1/3 in magnitude, so they only break vote ties.
        let combined = &votes + &confidences.mapv(|c| c / (3.0 * (c.abs() + 1.0)));
        Ok(combined
            .axis_iter(Axis(0))
            .map(|row| self.classes[argmax(&row.to_vec())])
            .collect())
    }
}
