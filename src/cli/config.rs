//! Resolved run configuration

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::model::ParamGrid;

/// Everything a run needs, independent of how it was supplied
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    pub train_path: PathBuf,
    pub predict_path: PathBuf,
    pub output_path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_path: Option<PathBuf>,
    pub seed: u64,
    pub test_size: f64,
    pub cv_folds: usize,
    pub grid: ParamGrid,
    pub infer_schema_length: usize,
    pub skip_production: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            train_path: PathBuf::from("train.csv"),
            predict_path: PathBuf::from("test.csv"),
            output_path: PathBuf::from("predictions.csv"),
            report_path: None,
            seed: 42,
            test_size: 0.2,
            cv_folds: 3,
            grid: ParamGrid::default(),
            infer_schema_length: 10000,
            skip_production: false,
        }
    }
}
