//! Exhaustive hyperparameter search with cross-validation
//!
//! Every combination of the grid is scored by stratified k-fold accuracy.
//! Combinations are evaluated in parallel via Rayon, but results are kept in
//! enumeration order so the winner does not depend on scheduling: the highest
//! mean validation accuracy wins and ties go to the earliest combination.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::model::{accuracy, stratified_k_fold, CvSplit, ForestModel, ForestParams, ModelError};
use crate::pipeline::FeatureMatrix;
use crate::utils::create_progress_bar;

/// Candidate values for each forest hyperparameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamGrid {
    pub n_estimators: Vec<u16>,
    pub max_depth: Vec<Option<u16>>,
    pub min_samples_split: Vec<usize>,
}

impl Default for ParamGrid {
    fn default() -> Self {
        Self {
            n_estimators: vec![10, 100, 200, 500],
            max_depth: vec![None, Some(5), Some(10)],
            min_samples_split: vec![2, 3, 4],
        }
    }
}

impl ParamGrid {
    /// Number of combinations
    pub fn len(&self) -> usize {
        self.n_estimators.len() * self.max_depth.len() * self.min_samples_split.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cartesian product, `n_estimators` outermost and `min_samples_split` innermost
    pub fn combinations(&self, seed: u64) -> Vec<ForestParams> {
        let mut out = Vec::with_capacity(self.len());
        for &n_estimators in &self.n_estimators {
            for &max_depth in &self.max_depth {
                for &min_samples_split in &self.min_samples_split {
                    out.push(ForestParams {
                        n_estimators,
                        max_depth,
                        min_samples_split,
                        seed,
                    });
                }
            }
        }
        out
    }
}

/// Cross-validation outcome for one combination
#[derive(Debug, Clone, Serialize)]
pub struct CvResult {
    pub params: ForestParams,
    pub split_test_scores: Vec<f64>,
    pub mean_test_score: f64,
    pub std_test_score: f64,
    pub split_train_scores: Vec<f64>,
    pub mean_train_score: f64,
    /// 1 = best; equal means share the lowest rank
    pub rank_test_score: usize,
}

/// Outcome of a completed search
#[derive(Debug)]
pub struct GridSearchResult {
    pub cv_results: Vec<CvResult>,
    pub best_index: usize,
    /// The winning configuration refitted on all rows given to the search
    pub best_estimator: ForestModel,
}

impl GridSearchResult {
    pub fn best_params(&self) -> ForestParams {
        self.cv_results[self.best_index].params
    }

    pub fn best_score(&self) -> f64 {
        self.cv_results[self.best_index].mean_test_score
    }
}

/// Grid search configuration
#[derive(Debug, Clone)]
pub struct GridSearch {
    grid: ParamGrid,
    n_folds: usize,
    seed: u64,
    show_progress: bool,
}

impl GridSearch {
    pub fn new(grid: ParamGrid, n_folds: usize, seed: u64) -> Self {
        Self {
            grid,
            n_folds,
            seed,
            show_progress: true,
        }
    }

    /// Toggle the terminal progress bar
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Score every combination on `x`/`y`, then refit the best on all rows
    pub fn fit(&self, x: &FeatureMatrix, y: &[i32]) -> Result<GridSearchResult, ModelError> {
        if self.grid.is_empty() {
            return Err(ModelError::EmptyGrid);
        }
        if x.n_rows() != y.len() {
            return Err(ModelError::LengthMismatch {
                features: x.n_rows(),
                labels: y.len(),
            });
        }

        let splits = stratified_k_fold(y, self.n_folds)?;
        let candidates = self.grid.combinations(self.seed);

        let pb = create_progress_bar(candidates.len() as u64, "   Grid search");
        if !self.show_progress {
            pb.set_draw_target(indicatif::ProgressDrawTarget::hidden());
        }

        let mut cv_results: Vec<CvResult> = candidates
            .par_iter()
            .map(|params| {
                let result = evaluate(x, y, &splits, *params);
                pb.inc(1);
                result
            })
            .collect::<Result<Vec<_>, ModelError>>()?;

        pb.finish_and_clear();

        assign_ranks(&mut cv_results);
        let best_index = select_best(&cv_results);
        let best_params = cv_results[best_index].params;

        tracing::info!(
            best = %best_params,
            score = cv_results[best_index].mean_test_score,
            combinations = cv_results.len(),
            "grid search complete"
        );

        let best_estimator = ForestModel::fit(x, y, best_params)?;

        Ok(GridSearchResult {
            cv_results,
            best_index,
            best_estimator,
        })
    }
}

/// Cross-validate one combination
fn evaluate(
    x: &FeatureMatrix,
    y: &[i32],
    splits: &[CvSplit],
    params: ForestParams,
) -> Result<CvResult, ModelError> {
    let mut split_test_scores = Vec::with_capacity(splits.len());
    let mut split_train_scores = Vec::with_capacity(splits.len());

    for split in splits {
        let x_train = x.select_rows(&split.train_indices);
        let y_train: Vec<i32> = split.train_indices.iter().map(|&i| y[i]).collect();
        let x_val = x.select_rows(&split.test_indices);
        let y_val: Vec<i32> = split.test_indices.iter().map(|&i| y[i]).collect();

        let model = ForestModel::fit(&x_train, &y_train, params)?;
        split_test_scores.push(accuracy(&y_val, &model.predict(&x_val)?));
        split_train_scores.push(accuracy(&y_train, &model.predict(&x_train)?));
    }

    let (mean_test_score, std_test_score) = mean_std(&split_test_scores);
    let (mean_train_score, _) = mean_std(&split_train_scores);

    Ok(CvResult {
        params,
        split_test_scores,
        mean_test_score,
        std_test_score,
        split_train_scores,
        mean_train_score,
        rank_test_score: 0,
    })
}

fn mean_std(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, var.sqrt())
}

fn assign_ranks(results: &mut [CvResult]) {
    let means: Vec<f64> = results.iter().map(|r| r.mean_test_score).collect();
    for result in results.iter_mut() {
        result.rank_test_score = 1 + means.iter().filter(|&&m| m > result.mean_test_score).count();
    }
}

/// First index holding the highest mean validation score
fn select_best(results: &[CvResult]) -> usize {
    let mut best = 0;
    for (i, result) in results.iter().enumerate().skip(1) {
        if result.mean_test_score > results[best].mean_test_score {
            best = i;
        }
    }
    best
}
