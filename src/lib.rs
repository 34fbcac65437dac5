//! Titanic-forest: Survival Prediction Library
//!
//! Loads the Titanic passenger table, splits it with stratification,
//! engineers features with fit-once transforms, selects a random forest by
//! cross-validated grid search and predicts survival for unlabeled rows.

pub mod cli;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod utils;
pub mod workflow;
