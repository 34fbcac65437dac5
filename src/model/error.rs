//! Error types for scaling, cross-validation and model fitting.

use thiserror::Error;

/// Errors raised while selecting, fitting or applying the classifier.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("{0} must be fitted before use")]
    NotFitted(&'static str),

    #[error("Cannot fit on an empty feature matrix")]
    EmptyData,

    #[error("Feature matrix has {features} row(s) but {labels} label(s) were given")]
    LengthMismatch { features: usize, labels: usize },

    #[error("Feature columns {found:?} do not match the fitted columns {expected:?}")]
    ColumnMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("Invalid number of folds {folds}: {reason}")]
    InvalidFolds { folds: usize, reason: String },

    #[error("Hyperparameter grid is empty")]
    EmptyGrid,

    #[error("Training failed: {0}")]
    TrainingFailed(String),

    #[error("Prediction failed: {0}")]
    PredictionFailed(String),
}
