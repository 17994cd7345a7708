use ndarray::ArrayView2;

use crate::error::{Result, SelectionError};

/// Sorted distinct class indices present in `y`.
pub fn unique_classes(y: &[usize]) -> Vec<usize> {
    let mut classes = y.to_vec();
    classes.sort_unstable();
    classes.dedup();
    classes
}

/// Index of the largest value; the first one wins ties.
pub fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > values[best] {
            best = i;
        }
    }
    best
}

/// Shared shape checks performed before any model is fitted.
pub fn check_fit_inputs<L>(model: &str, x: ArrayView2<f64>, y: &[L]) -> Result<()> {
    if x.nrows() == 0 {
        return Err(SelectionError::data(format!("{}: empty training set", model)));
    }
    if x.nrows() != y.len() {
        return Err(SelectionError::data(format!(
            "{}: {} feature rows but {} labels",
            model,
            x.nrows(),
            y.len()
        )));
    }
    if x.iter().any(|v| !v.is_finite()) {
        return Err(SelectionError::data(format!("{}: non-finite feature value", model)));
    }
    Ok(())
}

/// Shared check that a prediction matrix matches the fitted width.
pub fn check_predict_width(model: &str, x: ArrayView2<f64>, n_features: usize) -> Result<()> {
    if x.ncols() != n_features {
        return Err(SelectionError::data(format!(
            "{}: fitted on {} features but got {}",
            model,
            n_features,
            x.ncols()
        )));
    }
    Ok(())
}
