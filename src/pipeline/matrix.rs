//! Conversion from transformed frames to numeric feature matrices

use polars::prelude::*;
use serde::Serialize;

use crate::pipeline::{ensure_complete, PipelineError};

/// Label column of the labeled dataset
pub const TARGET_COLUMN: &str = "Survived";

/// Row identifier carried through to the predictions file
pub const ID_COLUMN: &str = "PassengerId";

/// Row-major numeric matrix with named columns.
///
/// Rows align 1:1 with the frame they were extracted from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureMatrix {
    pub names: Vec<String>,
    pub rows: Vec<Vec<f64>>,
}

impl FeatureMatrix {
    /// Extract `columns` from `df`, in the given order, as `f64`.
    ///
    /// Every column must exist, be numeric and be free of nulls.
    pub fn from_frame(df: &DataFrame, columns: &[String]) -> Result<Self, PipelineError> {
        ensure_complete(df, columns)?;

        let mut values: Vec<Vec<f64>> = Vec::with_capacity(columns.len());
        for name in columns {
            let column = df
                .column(name)
                .map_err(|_| PipelineError::missing_column(name, df))?;
            if !(column.dtype().is_primitive_numeric() || column.dtype() == &DataType::Boolean) {
                return Err(PipelineError::NonNumeric {
                    column: name.clone(),
                    dtype: column.dtype().to_string(),
                });
            }
            let cast = column.cast(&DataType::Float64)?;
            values.push(cast.f64()?.into_no_null_iter().collect());
        }

        let rows = (0..df.height())
            .map(|r| values.iter().map(|col| col[r]).collect())
            .collect();

        Ok(Self {
            names: columns.to_vec(),
            rows,
        })
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_cols(&self) -> usize {
        self.names.len()
    }

    /// Copy the given rows, in order
    pub fn select_rows(&self, indices: &[usize]) -> Self {
        Self {
            names: self.names.clone(),
            rows: indices.iter().map(|&i| self.rows[i].clone()).collect(),
        }
    }
}

/// Feature column names of a transformed frame: everything but the target
pub fn feature_columns(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|s| s.to_string())
        .filter(|name| name != TARGET_COLUMN)
        .collect()
}

/// Read the 0/1 survival labels
pub fn extract_labels(df: &DataFrame) -> Result<Vec<i32>, PipelineError> {
    let column = df
        .column(TARGET_COLUMN)
        .map_err(|_| PipelineError::missing_column(TARGET_COLUMN, df))?;
    ensure_complete(df, &[TARGET_COLUMN.to_string()])?;
    let cast = column.cast(&DataType::Int32)?;
    Ok(cast.i32()?.into_no_null_iter().collect())
}

/// Split a transformed labeled frame into its feature matrix and labels
pub fn split_features_labels(df: &DataFrame) -> Result<(FeatureMatrix, Vec<i32>), PipelineError> {
    let labels = extract_labels(df)?;
    let features = FeatureMatrix::from_frame(df, &feature_columns(df))?;
    Ok((features, labels))
}
