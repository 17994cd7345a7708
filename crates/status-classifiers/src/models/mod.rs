pub mod adaboost;
pub mod classifier_trait;
pub mod factory;
pub mod gbdt;
pub mod linear_svc;
pub mod multiclass;
pub mod naive_bayes;
pub mod utils;
