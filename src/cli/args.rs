//! Command-line argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

use crate::cli::RunConfig;
use crate::model::ParamGrid;

/// Titanic-forest - Train a grid-searched random forest and predict survival
#[derive(Parser, Debug)]
#[command(name = "titanic-forest")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Labeled training file (CSV or Parquet) with a Survived column
    #[arg(short = 'i', long)]
    pub train: PathBuf,

    /// Unlabeled file (CSV or Parquet) to predict
    #[arg(short = 'p', long)]
    pub predict: PathBuf,

    /// Output predictions path (CSV or Parquet, determined by extension).
    /// Defaults to the predict file's directory with a '_predictions' suffix
    /// (e.g., test.csv → test_predictions.csv).
    #[arg(short, long, value_parser = validate_output_path)]
    pub output: Option<PathBuf>,

    /// Optional JSON report of the hyperparameter search
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Random seed for the stratified split and the forests
    #[arg(long, default_value = "42")]
    pub seed: u64,

    /// Fraction of labeled rows held out for scoring the selected model
    #[arg(long, default_value = "0.2", value_parser = validate_test_size)]
    pub test_size: f64,

    /// Number of stratified cross-validation folds
    #[arg(long, default_value = "3", value_parser = validate_cv_folds)]
    pub cv_folds: usize,

    /// Candidate tree counts (comma-separated)
    #[arg(long, value_delimiter = ',', default_value = "10,100,200,500", value_parser = parse_n_estimators)]
    pub n_estimators: Vec<u16>,

    /// Candidate maximum depths (comma-separated, 'none' for unlimited)
    #[arg(long, value_delimiter = ',', default_value = "none,5,10", value_parser = parse_max_depth)]
    pub max_depth: Vec<Option<u16>>,

    /// Candidate minimum samples per split (comma-separated)
    #[arg(long, value_delimiter = ',', default_value = "2,3,4", value_parser = parse_min_samples_split)]
    pub min_samples_split: Vec<usize>,

    /// Number of rows to use for schema inference (CSV only).
    /// Use 0 for full table scan.
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,

    /// Stop after model selection; do not train the production model or write predictions
    #[arg(long, default_value = "false")]
    pub skip_production: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,
}

impl Cli {
    /// Get the output path, deriving from the predict file if not explicitly provided.
    pub fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            let parent = self
                .predict
                .parent()
                .unwrap_or_else(|| std::path::Path::new("."));
            let stem = self
                .predict
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("output");
            parent.join(format!("{}_predictions.csv", stem))
        })
    }

    /// Resolve the arguments into a run configuration
    pub fn to_config(&self) -> RunConfig {
        RunConfig {
            train_path: self.train.clone(),
            predict_path: self.predict.clone(),
            output_path: self.output_path(),
            report_path: self.report.clone(),
            seed: self.seed,
            test_size: self.test_size,
            cv_folds: self.cv_folds,
            grid: ParamGrid {
                n_estimators: self.n_estimators.clone(),
                max_depth: self.max_depth.clone(),
                min_samples_split: self.min_samples_split.clone(),
            },
            infer_schema_length: self.infer_schema_length,
            skip_production: self.skip_production,
        }
    }
}

/// Validator for test_size parameter
fn validate_test_size(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if value <= 0.0 || value >= 1.0 {
        Err(format!(
            "test_size must be strictly between 0.0 and 1.0, got {}",
            value
        ))
    } else {
        Ok(value)
    }
}

/// Validator for cv_folds parameter
fn validate_cv_folds(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid fold count", s))?;

    if value < 2 {
        Err(format!("cv_folds must be at least 2, got {}", value))
    } else {
        Ok(value)
    }
}

/// Parser for a single max_depth entry
fn parse_max_depth(s: &str) -> Result<Option<u16>, String> {
    let trimmed = s.trim();
    if trimmed.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    let depth: u16 = trimmed
        .parse()
        .map_err(|_| format!("'{}' is not a valid depth (use a positive integer or 'none')", s))?;
    if depth == 0 {
        Err("max_depth must be at least 1".to_string())
    } else {
        Ok(Some(depth))
    }
}

/// Parser for a single n_estimators entry
fn parse_n_estimators(s: &str) -> Result<u16, String> {
    let trees: u16 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a valid tree count", s))?;
    if trees == 0 {
        Err("n_estimators must be at least 1".to_string())
    } else {
        Ok(trees)
    }
}

/// Parser for a single min_samples_split entry
fn parse_min_samples_split(s: &str) -> Result<usize, String> {
    let split: usize = s
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a valid sample count", s))?;
    if split < 2 {
        Err(format!("min_samples_split must be at least 2, got {}", split))
    } else {
        Ok(split)
    }
}

/// Validator for the predictions output path: CSV or Parquet only
fn validate_output_path(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    match extension.as_str() {
        "csv" | "parquet" => Ok(path),
        _ => Err(format!(
            "Unsupported output format '{}'. Supported formats: csv, parquet",
            extension
        )),
    }
}
