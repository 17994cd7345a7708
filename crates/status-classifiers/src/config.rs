use std::path::Path;
use std::str::FromStr;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SelectionError};
use crate::io::LoaderConfig;

/// Binary estimators usable inside the one-vs-rest / one-vs-one wrappers.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub enum BinaryModelType {
    LinearSvc {
        c: f64,
        tol: f64,
        max_iter: usize,
        seed: u64,
    },
    GradientBoosting {
        max_depth: u32,
        num_boost_round: u32,
        learning_rate: f32,
    },
}

impl Default for BinaryModelType {
    fn default() -> Self {
        BinaryModelType::LinearSvc {
            c: 1.0,
            tol: 1e-4,
            max_iter: 10_000,
            seed: 0,
        }
    }
}

/// Supported candidate model types and their hyper-parameters.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub enum ModelType {
    OneVsRest { estimator: BinaryModelType },
    OneVsOne { estimator: BinaryModelType },
    MultinomialNb { alpha: f64 },
    AdaBoost { n_estimators: usize, learning_rate: f64 },
}

impl BinaryModelType {
    /// Reject hyper-parameters the estimator cannot be fitted with.
    pub fn validate(&self) -> Result<()> {
        match self {
            BinaryModelType::LinearSvc { c, tol, .. } => {
                if !(*c > 0.0) {
                    return Err(SelectionError::config(format!(
                        "LinearSVC: C must be positive, got {}",
                        c
                    )));
                }
                if !(*tol > 0.0) {
                    return Err(SelectionError::config(format!(
                        "LinearSVC: tol must be positive, got {}",
                        tol
                    )));
                }
            }
            BinaryModelType::GradientBoosting {
                num_boost_round,
                learning_rate,
                ..
            } => {
                if *num_boost_round == 0 {
                    return Err(SelectionError::config(
                        "GradientBoosting: num_boost_round must be positive",
                    ));
                }
                if !(*learning_rate > 0.0) {
                    return Err(SelectionError::config(format!(
                        "GradientBoosting: learning_rate must be positive, got {}",
                        learning_rate
                    )));
                }
            }
        }
        Ok(())
    }
}

impl ModelType {
    /// Reject hyper-parameters the model cannot be fitted with.
    pub fn validate(&self) -> Result<()> {
        match self {
            ModelType::OneVsRest { estimator } | ModelType::OneVsOne { estimator } => {
                estimator.validate()
            }
            ModelType::MultinomialNb { alpha } => {
                if !(*alpha >= 0.0) {
                    return Err(SelectionError::config(format!(
                        "MultinomialNB: alpha must be non-negative, got {}",
                        alpha
                    )));
                }
                Ok(())
            }
            ModelType::AdaBoost {
                n_estimators,
                learning_rate,
            } => {
                if *n_estimators == 0 || !(*learning_rate > 0.0) {
                    return Err(SelectionError::config(format!(
                        "AdaBoost: need n_estimators > 0 and learning_rate > 0, got {} and {}",
                        n_estimators, learning_rate
                    )));
                }
                Ok(())
            }
        }
    }
}

impl Default for ModelType {
    fn default() -> Self {
        ModelType::OneVsRest {
            estimator: BinaryModelType::default(),
        }
    }
}

impl FromStr for ModelType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ovr" | "one-vs-rest" | "onevsrest" => Ok(ModelType::OneVsRest {
                estimator: BinaryModelType::default(),
            }),
            "ovo" | "one-vs-one" | "onevsone" => Ok(ModelType::OneVsOne {
                estimator: BinaryModelType::default(),
            }),
            "nb" | "multinomial-nb" | "multinomialnb" => Ok(ModelType::MultinomialNb { alpha: 1.0 }),
            "adaboost" => Ok(ModelType::AdaBoost {
                n_estimators: 50,
                learning_rate: 1.0,
            }),
            "gbdt" => Ok(ModelType::OneVsRest {
                estimator: BinaryModelType::GradientBoosting {
                    max_depth: 3,
                    num_boost_round: 50,
                    learning_rate: 0.1,
                },
            }),
            _ => Err(format!(
                "Unknown model type: {}. Valid options are: ovr, ovo, nb, adaboost, gbdt",
                s
            )),
        }
    }
}

/// A named classifier configuration evaluated by the selector.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct CandidateConfig {
    pub name: String,

    #[serde(flatten)]
    pub model_type: ModelType,
}

impl CandidateConfig {
    pub fn new(name: impl Into<String>, model_type: ModelType) -> Self {
        Self {
            name: name.into(),
            model_type,
        }
    }
}

/// How training rows are assigned to cross-validation folds.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum FoldStrategy {
    /// Per-class round-robin allocation, no shuffling
    #[default]
    Stratified,
    /// Consecutive blocks of rows
    Contiguous,
}

/// Which candidate wins when mean scores are exactly equal.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    #[default]
    LastWins,
    FirstWins,
}

/// Parameters for a full selection run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SelectionConfig {
    pub train_fraction: f64,
    pub n_folds: usize,
    pub fold_strategy: FoldStrategy,
    pub tie_break: TieBreak,
    pub parallel_folds: bool,
    pub candidates: Vec<CandidateConfig>,
    /// How the customer table is read
    pub loader: LoaderConfig,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            train_fraction: 0.8,
            n_folds: 10,
            fold_strategy: FoldStrategy::default(),
            tie_break: TieBreak::default(),
            parallel_folds: false,
            candidates: default_candidates(),
            loader: LoaderConfig::default(),
        }
    }
}

impl SelectionConfig {
    /// Reject settings that cannot work for any dataset.
    pub fn validate(&self) -> Result<()> {
        if !(self.train_fraction > 0.0 && self.train_fraction <= 1.0) {
            return Err(SelectionError::config(format!(
                "train_fraction must lie in (0, 1], got {}",
                self.train_fraction
            )));
        }
        if self.n_folds < 2 {
            return Err(SelectionError::config(format!(
                "n_folds must be at least 2, got {}",
                self.n_folds
            )));
        }
        if self.candidates.is_empty() {
            return Err(SelectionError::config("no candidate classifiers configured"));
        }
        for candidate in &self.candidates {
            candidate.model_type.validate().map_err(|e| match e {
                SelectionError::Configuration(msg) => {
                    SelectionError::config(format!("candidate {}: {}", candidate.name, msg))
                }
                other => other,
            })?;
        }
        Ok(())
    }
}

/// The four candidates compared by default, in evaluation order.
pub fn default_candidates() -> Vec<CandidateConfig> {
    vec![
        CandidateConfig::new(
            "OneVsRest",
            ModelType::OneVsRest {
                estimator: BinaryModelType::default(),
            },
        ),
        CandidateConfig::new(
            "OneVsOne",
            ModelType::OneVsOne {
                estimator: BinaryModelType::default(),
            },
        ),
        CandidateConfig::new("MultinomialNB", ModelType::MultinomialNb { alpha: 1.0 }),
        CandidateConfig::new(
            "AdaBoostClassifier",
            ModelType::AdaBoost {
                n_estimators: 50,
                learning_rate: 1.0,
            },
        ),
    ]
}

/// Load a selection configuration from a JSON file.
pub fn load_config<P: AsRef<Path>>(path: P) -> anyhow::Result<SelectionConfig> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config: {}", path.as_ref().display()))?;
    let config: SelectionConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.as_ref().display()))?;
    Ok(config)
}
