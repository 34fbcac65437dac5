//! Benchmark for the stratified split, feature pipeline and grid search
//!
//! Run with: cargo bench --bench grid_search_benchmark

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use polars::prelude::*;
use rand::prelude::*;
use rand::SeedableRng;

use titanic_forest::model::{GridSearch, ParamGrid, StandardScaler};
use titanic_forest::pipeline::{
    split_features_labels, stratified_shuffle_split, FeatureMatrix, FeaturePipeline,
    FeatureTransform, DEFAULT_STRATA,
};

/// Generate a synthetic passenger table with the columns the pipeline reads
fn generate_passengers(n_rows: usize, seed: u64) -> DataFrame {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);

    let pclass: Vec<i64> = (0..n_rows).map(|_| rng.gen_range(1..=3)).collect();
    let sex: Vec<&str> = (0..n_rows)
        .map(|_| if rng.gen::<f64>() < 0.35 { "female" } else { "male" })
        .collect();
    let age: Vec<Option<f64>> = (0..n_rows)
        .map(|_| (rng.gen::<f64>() > 0.2).then(|| rng.gen_range(1.0..75.0)))
        .collect();
    let fare: Vec<f64> = pclass
        .iter()
        .map(|&c| rng.gen_range(5.0..40.0) * (4 - c) as f64)
        .collect();
    let embarked: Vec<&str> = (0..n_rows)
        .map(|_| ["S", "C", "Q"][rng.gen_range(0..3)])
        .collect();
    let survived: Vec<i64> = sex
        .iter()
        .zip(&pclass)
        .map(|(s, &c)| {
            let p = if *s == "female" { 0.75 } else { 0.2 } + (2 - c) as f64 * 0.1;
            i64::from(rng.gen::<f64>() < p)
        })
        .collect();

    df! {
        "PassengerId" => (1..=n_rows as i64).collect::<Vec<_>>(),
        "Survived" => survived,
        "Pclass" => pclass,
        "Sex" => sex,
        "Age" => age,
        "SibSp" => (0..n_rows).map(|_| rng.gen_range(0..4i64)).collect::<Vec<_>>(),
        "Parch" => (0..n_rows).map(|_| rng.gen_range(0..3i64)).collect::<Vec<_>>(),
        "Fare" => fare,
        "Embarked" => embarked,
    }
    .expect("Failed to create DataFrame")
}

fn prepared_matrix(n_rows: usize) -> (FeatureMatrix, Vec<i32>) {
    let df = generate_passengers(n_rows, 42);
    let transformed = FeaturePipeline::new()
        .fit_transform(&df)
        .expect("pipeline failed");
    let (x, y) = split_features_labels(&transformed).expect("feature extraction failed");
    let x = StandardScaler::new().fit_transform(&x).expect("scaling failed");
    (x, y)
}

/// Benchmark the stratified split for growing tables
fn benchmark_split(c: &mut Criterion) {
    let mut group = c.benchmark_group("stratified_split");

    for n_rows in [891, 10_000, 100_000] {
        let df = generate_passengers(n_rows, 42);
        group.throughput(Throughput::Elements(n_rows as u64));

        group.bench_with_input(BenchmarkId::from_parameter(n_rows), &df, |b, df| {
            b.iter(|| {
                let _ = stratified_shuffle_split(
                    black_box(df),
                    black_box(&DEFAULT_STRATA),
                    black_box(0.2),
                    black_box(42),
                );
            });
        });
    }

    group.finish();
}

/// Benchmark fitting the feature pipeline
fn benchmark_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("feature_pipeline");

    for n_rows in [891, 10_000] {
        let df = generate_passengers(n_rows, 42);
        group.throughput(Throughput::Elements(n_rows as u64));

        group.bench_with_input(BenchmarkId::from_parameter(n_rows), &df, |b, df| {
            b.iter(|| {
                let _ = FeaturePipeline::new().fit_transform(black_box(df));
            });
        });
    }

    group.finish();
}

/// Benchmark the grid search on a Titanic-sized table with growing grids
fn benchmark_grid_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_search");
    group.sample_size(10);

    let (x, y) = prepared_matrix(891);
    let grids = [
        (
            "1_combination",
            ParamGrid {
                n_estimators: vec![10],
                max_depth: vec![Some(5)],
                min_samples_split: vec![2],
            },
        ),
        (
            "6_combinations",
            ParamGrid {
                n_estimators: vec![10, 50],
                max_depth: vec![None, Some(5), Some(10)],
                min_samples_split: vec![2],
            },
        ),
    ];

    for (name, grid) in grids {
        group.bench_with_input(BenchmarkId::from_parameter(name), &grid, |b, grid| {
            b.iter(|| {
                let _ = GridSearch::new(grid.clone(), 3, 42)
                    .with_progress(false)
                    .fit(black_box(&x), black_box(&y));
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_split,
    benchmark_pipeline,
    benchmark_grid_search
);
criterion_main!(benches);
