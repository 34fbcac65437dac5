//! Removal of columns that carry no model input

use polars::prelude::*;

use crate::pipeline::{FeatureTransform, PipelineError};

/// Source categoricals, free text and the row identifier
pub const DROPPED_COLUMNS: [&str; 6] = ["Embarked", "Name", "Ticket", "Cabin", "Sex", "PassengerId"];

/// Drops a fixed list of columns, ignoring any that are already absent.
#[derive(Debug, Clone)]
pub struct FeatureDropper {
    columns: Vec<String>,
}

impl Default for FeatureDropper {
    fn default() -> Self {
        Self::new(&DROPPED_COLUMNS)
    }
}

impl FeatureDropper {
    pub fn new(columns: &[&str]) -> Self {
        Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl FeatureTransform for FeatureDropper {
    fn name(&self) -> &'static str {
        "FeatureDropper"
    }

    fn fit(&mut self, _df: &DataFrame) -> Result<(), PipelineError> {
        Ok(())
    }

    fn transform(&self, df: &DataFrame) -> Result<DataFrame, PipelineError> {
        let present: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .filter(|name| self.columns.contains(name))
            .collect();
        Ok(df.drop_many(present))
    }
}
