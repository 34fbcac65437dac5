//! Missing value analysis

use polars::prelude::*;

use crate::pipeline::PipelineError;

/// Ratio of null values per column, sorted descending
pub fn analyze_missing_values(df: &DataFrame) -> Vec<(String, f64)> {
    if df.height() == 0 {
        return Vec::new();
    }

    let rows = df.height() as f64;
    let mut missing_ratios: Vec<(String, f64)> = df
        .get_columns()
        .iter()
        .map(|col| (col.name().to_string(), col.null_count() as f64 / rows))
        .collect();

    missing_ratios.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    missing_ratios
}

/// Fail on the first of `columns` that still holds a null
pub fn ensure_complete(df: &DataFrame, columns: &[String]) -> Result<(), PipelineError> {
    for name in columns {
        let column = df
            .column(name)
            .map_err(|_| PipelineError::missing_column(name, df))?;
        let count = column.null_count();
        if count > 0 {
            return Err(PipelineError::UnexpectedNulls {
                column: name.clone(),
                count,
            });
        }
    }
    Ok(())
}
