//! Standard (z-score) feature scaling

use serde::{Deserialize, Serialize};

use crate::model::ModelError;
use crate::pipeline::FeatureMatrix;

/// Per-column centre and scale learned by [`StandardScaler::fit`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct ScalerParams {
    mean: f64,
    std: f64,
}

/// Standard scaler: `(x - mean) / std` with statistics from the fitted data.
///
/// Uses the population standard deviation. Constant columns get a scale of
/// 1.0 so they map to zero instead of NaN.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StandardScaler {
    columns: Vec<String>,
    params: Vec<ScalerParams>,
    is_fitted: bool,
}

impl StandardScaler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_fitted(&self) -> bool {
        self.is_fitted
    }

    /// Learn column means and standard deviations
    pub fn fit(&mut self, x: &FeatureMatrix) -> Result<&mut Self, ModelError> {
        if x.n_rows() == 0 {
            return Err(ModelError::EmptyData);
        }

        let n = x.n_rows() as f64;
        self.params = (0..x.n_cols())
            .map(|c| {
                let mean = x.rows.iter().map(|row| row[c]).sum::<f64>() / n;
                let var = x.rows.iter().map(|row| (row[c] - mean).powi(2)).sum::<f64>() / n;
                let std = var.sqrt();
                ScalerParams {
                    mean,
                    std: if std > 0.0 { std } else { 1.0 },
                }
            })
            .collect();
        self.columns = x.names.clone();
        self.is_fitted = true;
        Ok(self)
    }

    /// Scale `x` with the fitted statistics; columns must match the fit
    pub fn transform(&self, x: &FeatureMatrix) -> Result<FeatureMatrix, ModelError> {
        if !self.is_fitted {
            return Err(ModelError::NotFitted("StandardScaler"));
        }
        if x.names != self.columns {
            return Err(ModelError::ColumnMismatch {
                expected: self.columns.clone(),
                found: x.names.clone(),
            });
        }

        let rows = x
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .zip(&self.params)
                    .map(|(v, p)| (v - p.mean) / p.std)
                    .collect()
            })
            .collect();

        Ok(FeatureMatrix {
            names: x.names.clone(),
            rows,
        })
    }

    pub fn fit_transform(&mut self, x: &FeatureMatrix) -> Result<FeatureMatrix, ModelError> {
        self.fit(x)?;
        self.transform(x)
    }
}
