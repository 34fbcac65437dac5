//! Fit/transform seam and the chained feature pipeline

use polars::prelude::*;

use crate::pipeline::{AgeImputer, FeatureDropper, FeatureEncoder, PipelineError};

/// A table transform whose statistics are learned once and then frozen.
pub trait FeatureTransform {
    /// Short name used in logs and errors
    fn name(&self) -> &'static str;

    /// Learn whatever statistics the transform needs from `df`
    fn fit(&mut self, df: &DataFrame) -> Result<(), PipelineError>;

    /// Apply the fitted transform, returning a new frame
    fn transform(&self, df: &DataFrame) -> Result<DataFrame, PipelineError>;

    fn fit_transform(&mut self, df: &DataFrame) -> Result<DataFrame, PipelineError> {
        self.fit(df)?;
        self.transform(df)
    }
}

/// Age imputation, one-hot encoding and column dropping, in that order.
///
/// Each stage is fitted on the output of the previous one. Build a fresh
/// instance for every dataset the pipeline should learn from.
#[derive(Debug, Clone, Default)]
pub struct FeaturePipeline {
    pub imputer: AgeImputer,
    pub encoder: FeatureEncoder,
    pub dropper: FeatureDropper,
    fitted: bool,
}

impl FeaturePipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_fitted(&self) -> bool {
        self.fitted
    }

    fn stages_mut(&mut self) -> [&mut dyn FeatureTransform; 3] {
        [&mut self.imputer, &mut self.encoder, &mut self.dropper]
    }

    fn stages(&self) -> [&dyn FeatureTransform; 3] {
        [&self.imputer, &self.encoder, &self.dropper]
    }
}

impl FeatureTransform for FeaturePipeline {
    fn name(&self) -> &'static str {
        "FeaturePipeline"
    }

    fn fit(&mut self, df: &DataFrame) -> Result<(), PipelineError> {
        self.fit_transform(df).map(|_| ())
    }

    fn transform(&self, df: &DataFrame) -> Result<DataFrame, PipelineError> {
        if !self.fitted {
            return Err(PipelineError::NotFitted("FeaturePipeline"));
        }
        let mut current = df.clone();
        for stage in self.stages() {
            current = stage.transform(&current)?;
        }
        Ok(current)
    }

    fn fit_transform(&mut self, df: &DataFrame) -> Result<DataFrame, PipelineError> {
        let mut current = df.clone();
        for stage in self.stages_mut() {
            current = stage.fit_transform(&current)?;
            tracing::debug!(stage = stage.name(), cols = current.width(), "pipeline stage fitted");
        }
        self.fitted = true;
        Ok(current)
    }
}
