//! Shared test utilities and fixture generators

#![allow(dead_code)]

use polars::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;
use tempfile::TempDir;

use titanic_forest::model::ParamGrid;

/// Size of the canonical labeled passenger table
pub const LABELED_ROWS: usize = 891;

/// Size of the canonical unlabeled passenger table
pub const UNLABELED_ROWS: usize = 418;

struct Passenger {
    pclass: i64,
    sex: &'static str,
    age: Option<f64>,
    sib_sp: i64,
    parch: i64,
    fare: f64,
    cabin: Option<String>,
    embarked: Option<&'static str>,
}

fn generate_passenger(rng: &mut StdRng) -> Passenger {
    let pclass = match rng.gen::<f64>() {
        p if p < 0.24 => 1,
        p if p < 0.45 => 2,
        _ => 3,
    };
    let sex = if rng.gen::<f64>() < 0.35 { "female" } else { "male" };
    let age = if rng.gen::<f64>() < 0.2 {
        None
    } else {
        Some((rng.gen_range(1.0..75.0f64) * 2.0).round() / 2.0)
    };
    let fare = match pclass {
        1 => rng.gen_range(30.0..260.0),
        2 => rng.gen_range(10.0..40.0),
        _ => rng.gen_range(5.0..25.0),
    };
    let cabin = if pclass == 1 && rng.gen::<f64>() < 0.8 {
        Some(format!("C{}", rng.gen_range(1..130)))
    } else {
        None
    };
    let embarked = match rng.gen::<f64>() {
        p if p < 0.005 => None,
        p if p < 0.72 => Some("S"),
        p if p < 0.91 => Some("C"),
        _ => Some("Q"),
    };

    Passenger {
        pclass,
        sex,
        age,
        sib_sp: rng.gen_range(0..4),
        parch: rng.gen_range(0..3),
        fare,
        cabin,
        embarked,
    }
}

fn survival_probability(p: &Passenger) -> f64 {
    let base: f64 = if p.sex == "female" { 0.75 } else { 0.2 };
    let class_shift = match p.pclass {
        1 => 0.15,
        2 => 0.0,
        _ => -0.12,
    };
    let child_shift = match p.age {
        Some(age) if age < 12.0 => 0.2,
        _ => 0.0,
    };
    (base + class_shift + child_shift).clamp(0.1, 0.85)
}

fn build_frame(passengers: &[Passenger], first_id: i64, survived: Option<Vec<i64>>) -> DataFrame {
    let n = passengers.len() as i64;
    let mut columns: Vec<Column> = vec![Column::new(
        "PassengerId".into(),
        (first_id..first_id + n).collect::<Vec<i64>>(),
    )];
    if let Some(survived) = survived {
        columns.push(Column::new("Survived".into(), survived));
    }
    columns.extend([
        Column::new(
            "Pclass".into(),
            passengers.iter().map(|p| p.pclass).collect::<Vec<_>>(),
        ),
        Column::new(
            "Name".into(),
            (0..n)
                .map(|i| format!("Passenger, Mr. {}", first_id + i))
                .collect::<Vec<_>>(),
        ),
        Column::new(
            "Sex".into(),
            passengers.iter().map(|p| p.sex).collect::<Vec<_>>(),
        ),
        Column::new(
            "Age".into(),
            passengers.iter().map(|p| p.age).collect::<Vec<_>>(),
        ),
        Column::new(
            "SibSp".into(),
            passengers.iter().map(|p| p.sib_sp).collect::<Vec<_>>(),
        ),
        Column::new(
            "Parch".into(),
            passengers.iter().map(|p| p.parch).collect::<Vec<_>>(),
        ),
        Column::new(
            "Ticket".into(),
            (0..n)
                .map(|i| format!("A/{}", 10000 + first_id + i))
                .collect::<Vec<_>>(),
        ),
        Column::new(
            "Fare".into(),
            passengers.iter().map(|p| p.fare).collect::<Vec<_>>(),
        ),
        Column::new(
            "Cabin".into(),
            passengers
                .iter()
                .map(|p| p.cabin.clone())
                .collect::<Vec<_>>(),
        ),
        Column::new(
            "Embarked".into(),
            passengers.iter().map(|p| p.embarked).collect::<Vec<_>>(),
        ),
    ]);
    DataFrame::new(columns).unwrap()
}

/// Create a labeled frame with the Titanic schema.
///
/// Survival depends on sex, class and age so a forest can learn something.
/// Age has ~20% nulls, Cabin is mostly null and Embarked is rarely null.
pub fn create_titanic_dataframe(rows: usize, seed: u64) -> DataFrame {
    let mut rng = StdRng::seed_from_u64(seed);
    let passengers: Vec<Passenger> = (0..rows).map(|_| generate_passenger(&mut rng)).collect();
    let survived: Vec<i64> = passengers
        .iter()
        .map(|p| i64::from(rng.gen::<f64>() < survival_probability(p)))
        .collect();
    build_frame(&passengers, 1, Some(survived))
}

/// Create an unlabeled frame (no Survived column) with ids continuing after
/// the labeled table.
pub fn create_unlabeled_dataframe(rows: usize, seed: u64) -> DataFrame {
    let mut rng = StdRng::seed_from_u64(seed);
    let passengers: Vec<Passenger> = (0..rows).map(|_| generate_passenger(&mut rng)).collect();
    build_frame(&passengers, LABELED_ROWS as i64 + 1, None)
}

/// A two-combination grid that keeps end-to-end tests fast
pub fn small_grid() -> ParamGrid {
    ParamGrid {
        n_estimators: vec![10],
        max_depth: vec![Some(4), None],
        min_samples_split: vec![2],
    }
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("test_data.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Create a temporary directory with a test Parquet file
pub fn create_temp_parquet(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let parquet_path = temp_dir.path().join("test_data.parquet");

    let file = std::fs::File::create(&parquet_path).unwrap();
    ParquetWriter::new(file).finish(df).unwrap();

    (temp_dir, parquet_path)
}

/// Assert that a DataFrame has expected shape
pub fn assert_shape(df: &DataFrame, expected_rows: usize, expected_cols: usize) {
    let (rows, cols) = df.shape();
    assert_eq!(rows, expected_rows, "Row count mismatch: expected {}, got {}", expected_rows, rows);
    assert_eq!(cols, expected_cols, "Column count mismatch: expected {}, got {}", expected_cols, cols);
}

/// Assert that a DataFrame contains specific columns
pub fn assert_has_columns(df: &DataFrame, expected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in expected_cols {
        assert!(
            actual_cols.contains(&col.to_string()),
            "Missing expected column: '{}'. Actual columns: {:?}",
            col,
            actual_cols
        );
    }
}

/// Assert that a DataFrame does NOT contain specific columns
pub fn assert_missing_columns(df: &DataFrame, unexpected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in unexpected_cols {
        assert!(
            !actual_cols.contains(&col.to_string()),
            "Unexpected column still present: '{}'",
            col
        );
    }
}

/// Assert that no column of the frame holds a null
pub fn assert_no_nulls(df: &DataFrame) {
    for column in df.get_columns() {
        assert_eq!(
            column.null_count(),
            0,
            "Column '{}' still has nulls",
            column.name()
        );
    }
}
