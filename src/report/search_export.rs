//! Grid search export functionality

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::cli::RunConfig;
use crate::model::{CvResult, ForestParams};
use crate::report::RunSummary;

/// Metadata about the run
#[derive(Serialize)]
pub struct ReportMetadata {
    /// Timestamp of the run (ISO 8601 format)
    pub timestamp: String,
    /// Titanic-forest version
    pub version: String,
    /// Resolved configuration
    pub config: RunConfig,
}

/// Search outcome for one stage (selection or production)
#[derive(Serialize)]
pub struct SearchExport<'a> {
    pub best_params: ForestParams,
    pub best_score: f64,
    pub cv_results: &'a [CvResult],
}

/// Complete JSON report
#[derive(Serialize)]
pub struct RunReport<'a> {
    pub metadata: ReportMetadata,
    pub summary: &'a RunSummary,
    pub selection: SearchExport<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub production: Option<SearchExport<'a>>,
}

/// Export the run report to a JSON file
pub fn export_run_report(report: &RunReport, output_path: &Path) -> Result<()> {
    let json =
        serde_json::to_string_pretty(report).context("Failed to serialize run report to JSON")?;

    std::fs::write(output_path, json)
        .with_context(|| format!("Failed to write run report to {}", output_path.display()))?;

    Ok(())
}

/// Build report metadata stamped with the current time
pub fn report_metadata(config: &RunConfig) -> ReportMetadata {
    ReportMetadata {
        timestamp: Utc::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        config: config.clone(),
    }
}
