//! Missing value imputation

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::pipeline::{FeatureTransform, PipelineError};

/// Column filled by [`AgeImputer`]
pub const AGE_COLUMN: &str = "Age";

/// Mean imputer for the passenger age column.
///
/// The mean is computed once in [`fit`](FeatureTransform::fit) and reused for
/// every later [`transform`](FeatureTransform::transform), so test and
/// prediction data are filled with the training statistic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgeImputer {
    mean: Option<f64>,
}

impl AgeImputer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fitted mean, if any
    pub fn mean(&self) -> Option<f64> {
        self.mean
    }
}

impl FeatureTransform for AgeImputer {
    fn name(&self) -> &'static str {
        "AgeImputer"
    }

    fn fit(&mut self, df: &DataFrame) -> Result<(), PipelineError> {
        let column = df
            .column(AGE_COLUMN)
            .map_err(|_| PipelineError::missing_column(AGE_COLUMN, df))?
            .cast(&DataType::Float64)?;
        let mean = column
            .f64()?
            .mean()
            .ok_or_else(|| PipelineError::EmptyColumn(AGE_COLUMN.to_string()))?;

        tracing::debug!(mean, "age imputer fitted");
        self.mean = Some(mean);
        Ok(())
    }

    fn transform(&self, df: &DataFrame) -> Result<DataFrame, PipelineError> {
        let mean = self.mean.ok_or(PipelineError::NotFitted("AgeImputer"))?;

        let column = df
            .column(AGE_COLUMN)
            .map_err(|_| PipelineError::missing_column(AGE_COLUMN, df))?
            .cast(&DataType::Float64)?;
        let filled: Float64Chunked = column
            .f64()?
            .into_iter()
            .map(|v| Some(v.unwrap_or(mean)))
            .collect();

        let mut out = df.clone();
        out.with_column(filled.into_series().with_name(AGE_COLUMN.into()))?;
        Ok(out)
    }
}

/// Fill nulls in every column from the previous row.
///
/// Leading nulls have no predecessor and are then filled from the next
/// non-null row instead.
pub fn forward_fill(df: &DataFrame) -> Result<DataFrame, PipelineError> {
    let mut columns: Vec<Column> = Vec::with_capacity(df.width());
    for column in df.get_columns() {
        if column.null_count() == 0 {
            columns.push(column.clone());
            continue;
        }
        let series = column
            .as_materialized_series()
            .fill_null(FillNullStrategy::Forward(None))?
            .fill_null(FillNullStrategy::Backward(None))?;
        columns.push(series.into_column());
    }
    Ok(DataFrame::new(columns)?)
}
