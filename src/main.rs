//! Titanic-forest: Survival Prediction CLI Tool
//!
//! Trains a grid-searched random forest on the labeled passenger table and
//! writes survival predictions for an unlabeled one.

use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use console::style;

use titanic_forest::cli::Cli;
use titanic_forest::pipeline::{
    analyze_missing_values, load_dataset_with_progress, require_columns, save_dataset,
    TARGET_COLUMN,
};
use titanic_forest::report::{
    export_run_report, print_cv_results, report_metadata, RunReport, RunSummary, SearchExport,
};
use titanic_forest::utils::{
    create_spinner, finish_with_success, init_logging, print_banner, print_completion,
    print_config, print_info, print_metric, print_step_header, print_step_time, print_success,
};
use titanic_forest::workflow::{predict, select_model, train_production};

/// Number of grid combinations shown in the CV results table
const CV_TABLE_ROWS: usize = 5;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;
    let config = cli.to_config();

    // Print styled banner
    print_banner(env!("CARGO_PKG_VERSION"));

    // Print configuration card
    print_config(&config);

    // Step 1: Load labeled dataset
    print_step_header(1, "Load Labeled Data");
    let step_start = Instant::now();
    let (labeled, rows, cols, memory_mb) =
        load_dataset_with_progress(&config.train_path, config.infer_schema_length)?;
    require_columns(&labeled, &[TARGET_COLUMN, "Pclass", "Sex", "Age", "Embarked"])?;

    println!("\n    {} Dataset Statistics:", style("✧").cyan());
    println!("      Rows: {}", rows);
    println!("      Columns: {}", cols);
    println!("      Estimated memory: {:.2} MB", memory_mb);

    let missing: Vec<(String, f64)> = analyze_missing_values(&labeled)
        .into_iter()
        .filter(|(_, ratio)| *ratio > 0.0)
        .collect();
    if !missing.is_empty() {
        println!("\n    {} Missing values:", style("✧").cyan());
        for (column, ratio) in &missing {
            println!("      {}: {:.1}%", column, ratio * 100.0);
        }
    }

    let mut summary = RunSummary::new(rows);
    let elapsed = step_start.elapsed();
    summary.record_step("load", elapsed);
    print_step_time(elapsed);

    // Step 2: Stratified split, feature pipeline and grid search
    print_step_header(2, "Model Selection");
    let step_start = Instant::now();
    let selection = select_model(&labeled, &config)?;
    print_success("Grid search complete");

    print_metric("Train / test rows", format!("{} / {}", selection.train_rows, selection.test_rows));
    print_metric("Best estimator", selection.search.best_params());
    print_metric("CV accuracy", format!("{:.4}", selection.search.best_score()));
    print_metric("Test accuracy", format!("{:.4}", selection.test_accuracy));
    println!();
    print_cv_results(&selection.search.cv_results, CV_TABLE_ROWS);

    summary.set_selection(
        selection.train_rows,
        selection.test_rows,
        selection.feature_names.len(),
        selection.search.best_params(),
        selection.search.best_score(),
        selection.test_accuracy,
    );
    let elapsed = step_start.elapsed();
    summary.record_step("selection", elapsed);
    print_step_time(elapsed);

    let production = if config.skip_production {
        print_info("Skipping production training and prediction (--skip-production)");
        None
    } else {
        // Step 3: Refit everything on the complete labeled data
        print_step_header(3, "Production Training");
        let step_start = Instant::now();
        let production = train_production(&labeled, &config)?;
        print_success("Production model trained on all labeled rows");
        print_metric("Production estimator", production.search.best_params());
        let elapsed = step_start.elapsed();
        summary.record_step("production", elapsed);
        print_step_time(elapsed);

        // Step 4: Predict the unlabeled file
        print_step_header(4, "Predict");
        let step_start = Instant::now();
        let (unlabeled, _, _, _) =
            load_dataset_with_progress(&config.predict_path, config.infer_schema_length)?;
        let mut predictions = predict(&production, &unlabeled)?;
        let survived: Vec<i32> = predictions
            .column(TARGET_COLUMN)?
            .i32()?
            .into_no_null_iter()
            .collect();
        summary.set_predictions(production.search.best_params(), &survived);

        let spinner = create_spinner("Writing predictions...");
        save_dataset(&mut predictions, &config.output_path)?;
        finish_with_success(
            &spinner,
            &format!("Saved to {}", config.output_path.display()),
        );
        let elapsed = step_start.elapsed();
        summary.record_step("predict", elapsed);
        print_step_time(elapsed);

        Some(production)
    };

    if let Some(report_path) = &config.report_path {
        let report = RunReport {
            metadata: report_metadata(&config),
            summary: &summary,
            selection: SearchExport {
                best_params: selection.search.best_params(),
                best_score: selection.search.best_score(),
                cv_results: &selection.search.cv_results,
            },
            production: production.as_ref().map(|p| SearchExport {
                best_params: p.search.best_params(),
                best_score: p.search.best_score(),
                cv_results: &p.search.cv_results,
            }),
        };
        export_run_report(&report, report_path)?;
        print_success(&format!("Report written to {}", report_path.display()));
    }

    // Display summary
    summary.display();

    // Final completion message
    print_completion();

    Ok(())
}
