//! One-hot encoding of categorical passenger columns

use std::collections::BTreeSet;

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::pipeline::{FeatureTransform, PipelineError};

/// Categorical columns expanded into indicator columns
pub const CATEGORICAL_COLUMNS: [&str; 2] = ["Embarked", "Sex"];

/// Suffix of the indicator column marking a missing value
pub const NULL_CATEGORY: &str = "nan";

/// Categories observed for one source column during fit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedColumn {
    pub source: String,
    pub categories: Vec<String>,
    /// Whether the fitted data held nulls, which then get their own indicator
    pub null_indicator: bool,
}

impl EncodedColumn {
    /// Name of the indicator column for `category`
    pub fn indicator_name(&self, category: &str) -> String {
        format!("{}_{}", self.source, category)
    }

    /// All indicator column names, in category order, null indicator last
    pub fn indicator_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .categories
            .iter()
            .map(|c| self.indicator_name(c))
            .collect();
        if self.null_indicator {
            names.push(self.indicator_name(NULL_CATEGORY));
        }
        names
    }
}

/// One-hot encoder with a frozen category set.
///
/// Appends one `f64` indicator column per category seen during fit, plus a
/// `<column>_nan` indicator when the fitted column had nulls. Every row whose
/// value (or null) was seen during fit gets exactly one 1.0 in its group;
/// unseen values get all zeros.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureEncoder {
    columns: Vec<String>,
    fitted: Option<Vec<EncodedColumn>>,
}

impl Default for FeatureEncoder {
    fn default() -> Self {
        Self::new(&CATEGORICAL_COLUMNS)
    }
}

impl FeatureEncoder {
    pub fn new(columns: &[&str]) -> Self {
        Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            fitted: None,
        }
    }

    /// Fitted categories per source column
    pub fn encoded_columns(&self) -> Option<&[EncodedColumn]> {
        self.fitted.as_deref()
    }
}

impl FeatureTransform for FeatureEncoder {
    fn name(&self) -> &'static str {
        "FeatureEncoder"
    }

    fn fit(&mut self, df: &DataFrame) -> Result<(), PipelineError> {
        let mut fitted = Vec::with_capacity(self.columns.len());
        for source in &self.columns {
            let values = string_values(df, source)?;
            let null_indicator = values.iter().any(Option::is_none);
            let categories: BTreeSet<String> = values.into_iter().flatten().collect();
            if categories.is_empty() {
                return Err(PipelineError::EmptyColumn(source.clone()));
            }
            tracing::debug!(column = %source, ?categories, null_indicator, "encoder categories fitted");
            fitted.push(EncodedColumn {
                source: source.clone(),
                categories: categories.into_iter().collect(),
                null_indicator,
            });
        }
        self.fitted = Some(fitted);
        Ok(())
    }

    fn transform(&self, df: &DataFrame) -> Result<DataFrame, PipelineError> {
        let fitted = self
            .fitted
            .as_ref()
            .ok_or(PipelineError::NotFitted("FeatureEncoder"))?;

        let mut out = df.clone();
        for encoded in fitted {
            let values = string_values(df, &encoded.source)?;
            for category in &encoded.categories {
                let indicator: Vec<f64> = values
                    .iter()
                    .map(|v| match v {
                        Some(v) if v == category => 1.0,
                        _ => 0.0,
                    })
                    .collect();
                out.with_column(Column::new(
                    encoded.indicator_name(category).into(),
                    indicator,
                ))?;
            }
            if encoded.null_indicator {
                let indicator: Vec<f64> = values
                    .iter()
                    .map(|v| if v.is_none() { 1.0 } else { 0.0 })
                    .collect();
                out.with_column(Column::new(
                    encoded.indicator_name(NULL_CATEGORY).into(),
                    indicator,
                ))?;
            }
        }
        Ok(out)
    }
}

/// Read a column as optional strings, whatever its physical type
fn string_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>, PipelineError> {
    let column = df
        .column(name)
        .map_err(|_| PipelineError::missing_column(name, df))?
        .cast(&DataType::String)?;
    Ok(column
        .str()?
        .into_iter()
        .map(|v| v.map(|s| s.to_string()))
        .collect())
}
