//! Stratified shuffle split
//!
//! Partitions rows into train/test sets whose joint category proportions over
//! the strata columns track the full table's. Allocation per stratum is
//! proportional with largest-remainder rounding, and all shuffling is driven
//! by a seeded RNG so a fixed seed always yields the same split.

use std::collections::BTreeMap;

use polars::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::pipeline::PipelineError;

/// Columns whose joint distribution the default split preserves
pub const DEFAULT_STRATA: [&str; 3] = ["Survived", "Pclass", "Sex"];

/// Row positions for both sides of a split
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitIndices {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Compute a stratified shuffle split over `strata_columns`.
///
/// The number of test rows is `ceil(test_size * n)`; the remaining rows go to
/// train. Fails if `test_size` is outside (0, 1), a strata column is absent,
/// a stratum has fewer than two members, or either side would hold fewer rows
/// than there are strata.
pub fn stratified_shuffle_split(
    df: &DataFrame,
    strata_columns: &[&str],
    test_size: f64,
    seed: u64,
) -> Result<SplitIndices, PipelineError> {
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(PipelineError::InvalidTestSize(test_size));
    }

    let n = df.height();
    let strata = group_by_stratum(df, strata_columns)?;

    if let Some((key, rows)) = strata.iter().min_by_key(|(_, rows)| rows.len()) {
        if rows.len() < 2 {
            return Err(PipelineError::StratumTooSmall {
                stratum: key.clone(),
                count: rows.len(),
            });
        }
    }

    let n_test = (test_size * n as f64).ceil() as usize;
    let n_train = n - n_test;
    let n_strata = strata.len();

    if n_test < n_strata {
        return Err(PipelineError::SplitTooSmall {
            side: "test",
            size: n_test,
            strata: n_strata,
        });
    }
    if n_train < n_strata {
        return Err(PipelineError::SplitTooSmall {
            side: "train",
            size: n_train,
            strata: n_strata,
        });
    }

    let counts: Vec<usize> = strata.values().map(Vec::len).collect();
    let test_alloc = allocate(&counts, n_test);
    let remaining: Vec<usize> = counts
        .iter()
        .zip(&test_alloc)
        .map(|(c, t)| c - t)
        .collect();
    let train_alloc = allocate(&remaining, n_train);

    let mut rng = StdRng::seed_from_u64(seed);
    let mut train = Vec::with_capacity(n_train);
    let mut test = Vec::with_capacity(n_test);

    for ((rows, &t), &r) in strata.values().zip(&test_alloc).zip(&train_alloc) {
        let mut rows = rows.clone();
        rows.shuffle(&mut rng);
        test.extend_from_slice(&rows[..t]);
        train.extend_from_slice(&rows[t..t + r]);
    }

    train.shuffle(&mut rng);
    test.shuffle(&mut rng);

    tracing::debug!(
        strata = n_strata,
        train = train.len(),
        test = test.len(),
        seed,
        "stratified split computed"
    );

    Ok(SplitIndices { train, test })
}

/// Materialize both sides of a split, keeping the order of the index lists
pub fn apply_split(
    df: &DataFrame,
    split: &SplitIndices,
) -> Result<(DataFrame, DataFrame), PipelineError> {
    Ok((take_rows(df, &split.train)?, take_rows(df, &split.test)?))
}

/// Select rows by position
pub fn take_rows(df: &DataFrame, rows: &[usize]) -> Result<DataFrame, PipelineError> {
    let idx: Vec<IdxSize> = rows.iter().map(|&i| i as IdxSize).collect();
    let idx = IdxCa::from_vec("idx".into(), idx);
    Ok(df.take(&idx)?)
}

/// Group row positions by the string rendering of their strata values
fn group_by_stratum(
    df: &DataFrame,
    strata_columns: &[&str],
) -> Result<BTreeMap<String, Vec<usize>>, PipelineError> {
    let mut rendered: Vec<Vec<String>> = Vec::with_capacity(strata_columns.len());
    for name in strata_columns {
        let column = df
            .column(name)
            .map_err(|_| PipelineError::missing_column(name, df))?;
        let as_str = column.cast(&DataType::String)?;
        let values = as_str
            .str()?
            .into_iter()
            .map(|v| v.unwrap_or("null").to_string())
            .collect();
        rendered.push(values);
    }

    let mut strata: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    for row in 0..df.height() {
        let key = rendered
            .iter()
            .map(|values| values[row].as_str())
            .collect::<Vec<_>>()
            .join("|");
        strata.entry(key).or_default().push(row);
    }

    Ok(strata)
}

/// Distribute `draws` across classes in proportion to `counts`.
///
/// Floors the exact share of each class, then hands the leftover draws to the
/// classes with the largest fractional remainders (earlier classes win ties),
/// never exceeding a class's count.
fn allocate(counts: &[usize], draws: usize) -> Vec<usize> {
    let total: usize = counts.iter().sum();
    if total == 0 {
        return vec![0; counts.len()];
    }

    let exact: Vec<f64> = counts
        .iter()
        .map(|&c| c as f64 * draws as f64 / total as f64)
        .collect();
    let mut alloc: Vec<usize> = exact
        .iter()
        .zip(counts)
        .map(|(e, &c)| (e.floor() as usize).min(c))
        .collect();

    let mut order: Vec<usize> = (0..counts.len()).collect();
    order.sort_by(|&a, &b| {
        let ra = exact[a] - exact[a].floor();
        let rb = exact[b] - exact[b].floor();
        rb.partial_cmp(&ra).unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut need = draws.saturating_sub(alloc.iter().sum());
    while need > 0 {
        let mut progressed = false;
        for &i in &order {
            if need == 0 {
                break;
            }
            if alloc[i] < counts[i] {
                alloc[i] += 1;
                need -= 1;
                progressed = true;
            }
        }
        if !progressed {
            break;
        }
    }

    alloc
}
