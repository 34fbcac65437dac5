//! Error types for the feature pipeline.

use thiserror::Error;

/// Errors raised while splitting or transforming the passenger table.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A column the stage depends on is absent from the frame.
    #[error("Required column '{column}' not found. Available columns: {available:?}")]
    MissingColumn {
        column: String,
        available: Vec<String>,
    },

    /// A transform was applied before `fit` was called.
    #[error("{0} must be fitted before transform")]
    NotFitted(&'static str),

    /// The column holds no usable (non-null) values to fit on.
    #[error("Column '{0}' has no non-null values to fit on")]
    EmptyColumn(String),

    /// Split fraction outside of (0, 1).
    #[error("test_size must be strictly between 0.0 and 1.0, got {0}")]
    InvalidTestSize(f64),

    /// A stratum is too small to appear on both sides of the split.
    #[error("The least populated stratum '{stratum}' has only {count} member(s); at least 2 are required")]
    StratumTooSmall { stratum: String, count: usize },

    /// Requested split leaves fewer rows than strata on one side.
    #[error("The {side} split has {size} row(s), which is fewer than the {strata} strata")]
    SplitTooSmall {
        side: &'static str,
        size: usize,
        strata: usize,
    },

    /// A feature column still holds nulls after the pipeline ran.
    #[error("Feature column '{column}' still has {count} missing value(s)")]
    UnexpectedNulls { column: String, count: usize },

    /// A feature column cannot be read as a number.
    #[error("Feature column '{column}' is not numeric ({dtype})")]
    NonNumeric { column: String, dtype: String },

    /// Error bubbled up from polars.
    #[error(transparent)]
    Polars(#[from] polars::prelude::PolarsError),
}

impl PipelineError {
    pub(crate) fn missing_column(column: &str, df: &polars::prelude::DataFrame) -> Self {
        Self::MissingColumn {
            column: column.to_string(),
            available: df
                .get_column_names()
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}
