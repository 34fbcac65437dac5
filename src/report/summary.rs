//! Run summary report generation

use std::time::Duration;

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;
use serde::Serialize;

use crate::model::ForestParams;

/// Summary of one end-to-end run
#[derive(Debug, Default, Serialize)]
pub struct RunSummary {
    pub labeled_rows: usize,
    pub train_rows: usize,
    pub test_rows: usize,
    pub feature_count: usize,
    pub selected: Option<ForestParams>,
    pub cv_score: Option<f64>,
    pub test_accuracy: Option<f64>,
    pub production: Option<ForestParams>,
    pub predicted_rows: Option<usize>,
    pub predicted_survivors: Option<usize>,
    #[serde(skip)]
    pub step_times: Vec<(String, Duration)>,
}

impl RunSummary {
    pub fn new(labeled_rows: usize) -> Self {
        Self {
            labeled_rows,
            ..Default::default()
        }
    }

    pub fn set_selection(
        &mut self,
        train_rows: usize,
        test_rows: usize,
        feature_count: usize,
        selected: ForestParams,
        cv_score: f64,
        test_accuracy: f64,
    ) {
        self.train_rows = train_rows;
        self.test_rows = test_rows;
        self.feature_count = feature_count;
        self.selected = Some(selected);
        self.cv_score = Some(cv_score);
        self.test_accuracy = Some(test_accuracy);
    }

    pub fn set_predictions(&mut self, production: ForestParams, predictions: &[i32]) {
        self.production = Some(production);
        self.predicted_rows = Some(predictions.len());
        self.predicted_survivors = Some(predictions.iter().filter(|&&p| p == 1).count());
    }

    pub fn record_step(&mut self, name: &str, elapsed: Duration) {
        self.step_times.push((name.to_string(), elapsed));
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("RUN SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![
            Cell::new("📁 Labeled rows"),
            Cell::new(self.labeled_rows),
        ]);
        table.add_row(vec![
            Cell::new("✂️  Train / test split"),
            Cell::new(format!("{} / {}", self.train_rows, self.test_rows)),
        ]);
        table.add_row(vec![Cell::new("🧮 Features"), Cell::new(self.feature_count)]);

        if let Some(selected) = &self.selected {
            table.add_row(vec![Cell::new("🌲 Selected"), Cell::new(selected)]);
        }
        if let Some(score) = self.cv_score {
            table.add_row(vec![
                Cell::new("🔁 CV accuracy"),
                Cell::new(format!("{:.4}", score)).fg(Color::Cyan),
            ]);
        }
        if let Some(accuracy) = self.test_accuracy {
            let color = if accuracy >= 0.8 {
                Color::Green
            } else if accuracy >= 0.7 {
                Color::Yellow
            } else {
                Color::Red
            };
            table.add_row(vec![
                Cell::new("🎯 Test accuracy"),
                Cell::new(format!("{:.4}", accuracy))
                    .fg(color)
                    .add_attribute(Attribute::Bold),
            ]);
        }
        if let Some(production) = &self.production {
            table.add_row(vec![Cell::new("🏭 Production"), Cell::new(production)]);
        }
        if let (Some(rows), Some(survivors)) = (self.predicted_rows, self.predicted_survivors) {
            table.add_row(vec![
                Cell::new("✅ Predictions"),
                Cell::new(format!("{} rows, {} survivors", rows, survivors))
                    .fg(Color::Green)
                    .add_attribute(Attribute::Bold),
            ]);
        }

        let total: Duration = self.step_times.iter().map(|(_, d)| *d).sum();
        table.add_row(vec![
            Cell::new("⏱  Total time"),
            Cell::new(format!("{:.2}s", total.as_secs_f64())),
        ]);

        // Indent the table
        for line in table.to_string().lines() {
            println!("    {}", line);
        }
    }
}
