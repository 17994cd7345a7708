use thiserror::Error;

/// Failures raised by the selection procedure.
///
/// Every variant is fatal for a run: nothing is retried.
#[derive(Debug, Error)]
pub enum SelectionError {
    /// Malformed, empty or misaligned feature/label arrays, or an empty split segment.
    #[error("data error: {0}")]
    Data(String),
    /// Fold count, train fraction or candidate roster unusable for the given data.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// A candidate classifier could not be fitted.
    #[error("failed to fit {model}: {reason}")]
    ModelFit { model: String, reason: String },
}

impl SelectionError {
    pub fn data(msg: impl Into<String>) -> Self {
        SelectionError::Data(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        SelectionError::Configuration(msg.into())
    }

    pub fn fit(model: impl Into<String>, reason: impl Into<String>) -> Self {
        SelectionError::ModelFit {
            model: model.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SelectionError>;
