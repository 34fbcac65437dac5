//! End-to-end stages: model selection, production training and prediction
//!
//! Every stage builds its own [`FeaturePipeline`] and [`StandardScaler`], so
//! no fitted statistic leaks from one stage into another.

use anyhow::{Context, Result};
use polars::prelude::*;

use crate::cli::RunConfig;
use crate::model::{GridSearch, GridSearchResult, StandardScaler};
use crate::pipeline::{
    apply_split, extract_labels, forward_fill, require_columns, split_features_labels, stratified_shuffle_split,
    FeatureMatrix, FeaturePipeline, FeatureTransform, DEFAULT_STRATA, ID_COLUMN, TARGET_COLUMN,
};

/// Result of selecting a model on the stratified train split
#[derive(Debug)]
pub struct SelectionOutcome {
    pub train_rows: usize,
    pub test_rows: usize,
    pub feature_names: Vec<String>,
    pub search: GridSearchResult,
    /// Accuracy of the best estimator on the held-out split
    pub test_accuracy: f64,
}

/// Pipeline, scaler and model fitted on the complete labeled data
#[derive(Debug)]
pub struct ProductionModel {
    pub pipeline: FeaturePipeline,
    pub scaler: StandardScaler,
    pub search: GridSearchResult,
}

/// Split the labeled data, search the grid on the train side and score the
/// winner on the held-out side.
pub fn select_model(labeled: &DataFrame, config: &RunConfig) -> Result<SelectionOutcome> {
    let split = stratified_shuffle_split(labeled, &DEFAULT_STRATA, config.test_size, config.seed)
        .context("Failed to compute stratified split")?;
    let (train_df, test_df) = apply_split(labeled, &split)?;

    let mut pipeline = FeaturePipeline::new();
    let train_df = pipeline
        .fit_transform(&train_df)
        .context("Failed to fit feature pipeline on the train split")?;
    let test_df = pipeline
        .transform(&test_df)
        .context("Failed to transform the held-out split")?;

    let (x_train, y_train) = split_features_labels(&train_df)?;
    let x_test = FeatureMatrix::from_frame(&test_df, &x_train.names)?;
    let y_test = extract_labels(&test_df)?;

    let mut scaler = StandardScaler::new();
    let x_train = scaler.fit_transform(&x_train)?;
    let x_test = scaler.transform(&x_test)?;

    let search = GridSearch::new(config.grid.clone(), config.cv_folds, config.seed)
        .fit(&x_train, &y_train)
        .context("Grid search failed")?;
    let test_accuracy = search.best_estimator.score(&x_test, &y_test)?;

    Ok(SelectionOutcome {
        train_rows: x_train.n_rows(),
        test_rows: x_test.n_rows(),
        feature_names: x_train.names,
        search,
        test_accuracy,
    })
}

/// Refit pipeline, scaler and grid search on every labeled row
pub fn train_production(labeled: &DataFrame, config: &RunConfig) -> Result<ProductionModel> {
    let mut pipeline = FeaturePipeline::new();
    let full_df = pipeline
        .fit_transform(labeled)
        .context("Failed to fit feature pipeline on the full dataset")?;

    let (x_full, y_full) = split_features_labels(&full_df)?;
    let mut scaler = StandardScaler::new();
    let x_full = scaler.fit_transform(&x_full)?;

    let search = GridSearch::new(config.grid.clone(), config.cv_folds, config.seed)
        .fit(&x_full, &y_full)
        .context("Production grid search failed")?;

    Ok(ProductionModel {
        pipeline,
        scaler,
        search,
    })
}

/// Predict survival for an unlabeled frame.
///
/// Returns a frame with `PassengerId` and a 0/1 `Survived` column, one row per
/// input row, in input order.
pub fn predict(model: &ProductionModel, unlabeled: &DataFrame) -> Result<DataFrame> {
    require_columns(unlabeled, &[ID_COLUMN])?;
    let ids = unlabeled.column(ID_COLUMN)?.clone();

    let transformed = model
        .pipeline
        .transform(unlabeled)
        .context("Failed to transform the prediction data")?;
    let transformed = forward_fill(&transformed)?;

    let feature_names = model.search.best_estimator.feature_names().to_vec();
    let x = FeatureMatrix::from_frame(&transformed, &feature_names)
        .context("Prediction data does not match the trained feature columns")?;
    let x = model.scaler.transform(&x)?;

    let predictions = model.search.best_estimator.predict(&x)?;

    let out = DataFrame::new(vec![ids, Column::new(TARGET_COLUMN.into(), predictions)])?;
    Ok(out)
}
