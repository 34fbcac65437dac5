//! Integration tests for the end-to-end selection, training and prediction run

use polars::prelude::*;
use titanic_forest::cli::RunConfig;
use titanic_forest::pipeline::*;
use titanic_forest::workflow::{predict, select_model, train_production};

#[path = "common/mod.rs"]
mod common;

use common::*;

fn fast_config() -> RunConfig {
    RunConfig {
        grid: small_grid(),
        ..Default::default()
    }
}

#[test]
fn test_model_selection_on_full_table() {
    let labeled = create_titanic_dataframe(LABELED_ROWS, 42);

    let outcome = select_model(&labeled, &fast_config()).unwrap();

    assert_eq!(outcome.train_rows, 712);
    assert_eq!(outcome.test_rows, 179);
    assert_eq!(outcome.search.cv_results.len(), small_grid().len());
    assert!((0.0..=1.0).contains(&outcome.test_accuracy));
    assert!(
        outcome.search.best_score() > 0.6,
        "Sex and class carry signal; CV accuracy was {}",
        outcome.search.best_score()
    );

    for dropped in DROPPED_COLUMNS {
        assert!(!outcome.feature_names.contains(&dropped.to_string()));
    }
    assert!(!outcome.feature_names.contains(&TARGET_COLUMN.to_string()));
    assert!(outcome.feature_names.contains(&"Sex_female".to_string()));
}

#[test]
fn test_model_selection_is_reproducible() {
    let labeled = create_titanic_dataframe(LABELED_ROWS, 42);
    let config = fast_config();

    let a = select_model(&labeled, &config).unwrap();
    let b = select_model(&labeled, &config).unwrap();

    assert_eq!(a.search.best_index, b.search.best_index);
    assert_eq!(a.test_accuracy, b.test_accuracy);
}

#[test]
fn test_predictions_cover_every_unlabeled_row() {
    let labeled = create_titanic_dataframe(LABELED_ROWS, 42);
    let unlabeled = create_unlabeled_dataframe(UNLABELED_ROWS, 43);

    let model = train_production(&labeled, &fast_config()).unwrap();
    let predictions = predict(&model, &unlabeled).unwrap();

    assert_shape(&predictions, UNLABELED_ROWS, 2);
    assert_eq!(predictions.get_column_names(), &[ID_COLUMN, TARGET_COLUMN]);
    assert_no_nulls(&predictions);

    assert!(predictions
        .column(ID_COLUMN)
        .unwrap()
        .as_materialized_series()
        .equals(unlabeled.column(ID_COLUMN).unwrap().as_materialized_series()));
    let survived = predictions.column(TARGET_COLUMN).unwrap();
    assert_eq!(survived.dtype(), &DataType::Int32);
    assert!(survived
        .i32()
        .unwrap()
        .into_no_null_iter()
        .all(|v| v == 0 || v == 1));
}

#[test]
fn test_prediction_fills_gaps_in_unlabeled_rows() {
    let labeled = create_titanic_dataframe(LABELED_ROWS, 42);
    let mut unlabeled = create_unlabeled_dataframe(20, 43);
    let fares: Vec<Option<f64>> = unlabeled
        .column("Fare")
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .enumerate()
        .map(|(i, v)| if i == 0 || i == 7 { None } else { v })
        .collect();
    unlabeled
        .with_column(Column::new("Fare".into(), fares))
        .unwrap();

    let model = train_production(&labeled, &fast_config()).unwrap();
    let predictions = predict(&model, &unlabeled).unwrap();

    assert_eq!(predictions.height(), 20);
    assert_no_nulls(&predictions);
}

#[test]
fn test_production_uses_all_labeled_rows() {
    let labeled = create_titanic_dataframe(LABELED_ROWS, 42);

    let model = train_production(&labeled, &fast_config()).unwrap();

    assert!(model.pipeline.is_fitted());
    assert!(model.scaler.is_fitted());
    let full_mean = labeled
        .column("Age")
        .unwrap()
        .f64()
        .unwrap()
        .mean()
        .unwrap();
    assert!((model.pipeline.imputer.mean().unwrap() - full_mean).abs() < 1e-12);
}

#[test]
fn test_predictions_round_trip_through_csv() {
    let labeled = create_titanic_dataframe(LABELED_ROWS, 42);
    let mut unlabeled = create_unlabeled_dataframe(UNLABELED_ROWS, 43);
    let (temp_dir, predict_path) = create_temp_csv(&mut unlabeled);

    let model = train_production(&labeled, &fast_config()).unwrap();
    let loaded = load_dataset(&predict_path, 10000).unwrap();
    let mut predictions = predict(&model, &loaded).unwrap();

    let output = temp_dir.path().join("predictions.csv");
    save_dataset(&mut predictions, &output).unwrap();

    let written = load_dataset(&output, 10000).unwrap();
    assert_shape(&written, UNLABELED_ROWS, 2);
    assert_has_columns(&written, &["PassengerId", "Survived"]);
}
