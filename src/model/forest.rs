//! Random forest classifier
//!
//! Thin wrapper around the smartcore random forest that keeps the feature
//! names it was trained on and the hyperparameters that produced it.

use std::fmt;

use serde::{Deserialize, Serialize};
use smartcore::ensemble::random_forest_classifier::{
    RandomForestClassifier, RandomForestClassifierParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;

use crate::model::ModelError;
use crate::pipeline::FeatureMatrix;

type Forest = RandomForestClassifier<f64, i32, DenseMatrix<f64>, Vec<i32>>;

/// Hyperparameters for one forest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForestParams {
    /// Number of trees
    pub n_estimators: u16,
    /// Maximum tree depth (`None` = grow until pure)
    pub max_depth: Option<u16>,
    /// Minimum samples required to split a node
    pub min_samples_split: usize,
    /// Seed for bootstrap sampling and feature subsampling
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            max_depth: None,
            min_samples_split: 2,
            seed: 42,
        }
    }
}

impl ForestParams {
    fn to_smartcore(self) -> RandomForestClassifierParameters {
        RandomForestClassifierParameters {
            n_trees: self.n_estimators,
            max_depth: self.max_depth,
            min_samples_split: self.min_samples_split,
            seed: self.seed,
            ..Default::default()
        }
    }
}

impl fmt::Display for ForestParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let depth = self
            .max_depth
            .map(|d| d.to_string())
            .unwrap_or_else(|| "None".to_string());
        write!(
            f,
            "RandomForestClassifier(n_estimators={}, max_depth={}, min_samples_split={})",
            self.n_estimators, depth, self.min_samples_split
        )
    }
}

/// A fitted forest, read-only after [`ForestModel::fit`]
pub struct ForestModel {
    params: ForestParams,
    feature_names: Vec<String>,
    forest: Forest,
}

impl fmt::Debug for ForestModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForestModel")
            .field("params", &self.params)
            .field("feature_names", &self.feature_names)
            .finish_non_exhaustive()
    }
}

impl ForestModel {
    /// Train a forest on `x` with labels `y`
    pub fn fit(x: &FeatureMatrix, y: &[i32], params: ForestParams) -> Result<Self, ModelError> {
        if x.n_rows() == 0 {
            return Err(ModelError::EmptyData);
        }
        if x.n_rows() != y.len() {
            return Err(ModelError::LengthMismatch {
                features: x.n_rows(),
                labels: y.len(),
            });
        }

        let matrix = DenseMatrix::from_2d_vec(&x.rows);
        let labels = y.to_vec();
        let forest = RandomForestClassifier::fit(&matrix, &labels, params.to_smartcore())
            .map_err(|e| ModelError::TrainingFailed(e.to_string()))?;

        Ok(Self {
            params,
            feature_names: x.names.clone(),
            forest,
        })
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Predict a class label for every row of `x`
    pub fn predict(&self, x: &FeatureMatrix) -> Result<Vec<i32>, ModelError> {
        if x.names != self.feature_names {
            return Err(ModelError::ColumnMismatch {
                expected: self.feature_names.clone(),
                found: x.names.clone(),
            });
        }
        if x.n_rows() == 0 {
            return Ok(Vec::new());
        }

        let matrix = DenseMatrix::from_2d_vec(&x.rows);
        self.forest
            .predict(&matrix)
            .map_err(|e| ModelError::PredictionFailed(e.to_string()))
    }

    /// Mean accuracy of the predictions for `x` against `y`
    pub fn score(&self, x: &FeatureMatrix, y: &[i32]) -> Result<f64, ModelError> {
        if x.n_rows() != y.len() {
            return Err(ModelError::LengthMismatch {
                features: x.n_rows(),
                labels: y.len(),
            });
        }
        let predicted = self.predict(x)?;
        Ok(accuracy(y, &predicted))
    }
}

/// Fraction of positions where `y_pred` equals `y_true`
pub fn accuracy(y_true: &[i32], y_pred: &[i32]) -> f64 {
    if y_true.is_empty() {
        return 0.0;
    }
    let correct = y_true
        .iter()
        .zip(y_pred)
        .filter(|(t, p)| t == p)
        .count();
    correct as f64 / y_true.len() as f64
}
