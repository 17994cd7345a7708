use crate::config::{BinaryModelType, CandidateConfig, ModelType};
use crate::models::adaboost::AdaBoost;
use crate::models::classifier_trait::Classifier;
use crate::models::gbdt::GradientBoosting;
use crate::models::linear_svc::LinearSvc;
use crate::models::multiclass::{OneVsOne, OneVsRest};
use crate::models::naive_bayes::MultinomialNb;

/// A named, unfitted classifier taking part in model selection.
pub struct Candidate {
    pub name: String,
    pub classifier: Box<dyn Classifier>,
}

impl Candidate {
    pub fn new(name: impl Into<String>, classifier: Box<dyn Classifier>) -> Self {
        Candidate {
            name: name.into(),
            classifier,
        }
    }
}

impl std::fmt::Debug for Candidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Candidate")
            .field("name", &self.name)
            .field("classifier", &self.classifier.name())
            .finish()
    }
}

/// Build a boxed classifier from a `ModelType`.
pub fn build_model(model_type: &ModelType) -> Box<dyn Classifier> {
    match model_type {
        ModelType::OneVsRest { estimator } => match estimator {
            BinaryModelType::LinearSvc { c, tol, max_iter, seed } => {
                Box::new(OneVsRest::new(LinearSvc::new(*c, *tol, *max_iter, *seed)))
            }
            BinaryModelType::GradientBoosting {
                max_depth,
                num_boost_round,
                learning_rate,
            } => Box::new(OneVsRest::new(GradientBoosting::new(
                *max_depth,
                *num_boost_round,
                *learning_rate,
            ))),
        },
        ModelType::OneVsOne { estimator } => match estimator {
            BinaryModelType::LinearSvc { c, tol, max_iter, seed } => {
                Box::new(OneVsOne::new(LinearSvc::new(*c, *tol, *max_iter, *seed)))
            }
            BinaryModelType::GradientBoosting {
                max_depth,
                num_boost_round,
                learning_rate,
            } => Box::new(OneVsOne::new(GradientBoosting::new(
                *max_depth,
                *num_boost_round,
                *learning_rate,
            ))),
        },
        ModelType::MultinomialNb { alpha } => Box::new(MultinomialNb::new(*alpha)),
        ModelType::AdaBoost {
            n_estimators,
            learning_rate,
        } => Box::new(AdaBoost::new(*n_estimators, *learning_rate)),
    }
}

/// Build the candidate roster in configuration order.
pub fn build_candidates(configs: &[CandidateConfig]) -> Vec<Candidate> {
    configs
        .iter()
        .map(|c| Candidate::new(c.name.clone(), build_model(&c.model_type)))
        .collect()
}
