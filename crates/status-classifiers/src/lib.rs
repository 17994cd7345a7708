//! status-classifiers: cross-validated model selection for customer-status labels.
//!
//! A labeled dataset is split in order into training and validation
//! segments, a roster of candidate classifiers is scored by k-fold
//! cross-validation on the training segment, the best one is refitted and
//! its validation accuracy is compared with a majority-class baseline.
//!
//! The classifiers (linear SVC under one-vs-rest / one-vs-one, multinomial
//! naive Bayes, AdaBoost and gradient-boosted trees) live in `models` behind
//! the `Classifier` / `FittedModel` traits.
pub mod config;
pub mod cross_validation;
pub mod data_handling;
pub mod error;
pub mod io;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod selection;
pub mod stats;
pub mod validation;

pub use error::{Result, SelectionError};
