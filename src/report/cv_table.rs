//! Terminal table of cross-validation results

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};

use crate::model::CvResult;

/// Build a table of the `limit` best combinations, ordered by rank
pub fn cv_results_table(results: &[CvResult], limit: usize) -> Table {
    let mut ranked: Vec<&CvResult> = results.iter().collect();
    ranked.sort_by_key(|r| r.rank_test_score);

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Rank").add_attribute(Attribute::Bold),
        Cell::new("n_estimators").add_attribute(Attribute::Bold),
        Cell::new("max_depth").add_attribute(Attribute::Bold),
        Cell::new("min_samples_split").add_attribute(Attribute::Bold),
        Cell::new("Mean test").add_attribute(Attribute::Bold),
        Cell::new("Std test").add_attribute(Attribute::Bold),
        Cell::new("Mean train").add_attribute(Attribute::Bold),
    ]);

    for result in ranked.into_iter().take(limit) {
        let depth = result
            .params
            .max_depth
            .map(|d| d.to_string())
            .unwrap_or_else(|| "None".to_string());
        let score_cell = Cell::new(format!("{:.4}", result.mean_test_score));
        let score_cell = if result.rank_test_score == 1 {
            score_cell.fg(Color::Green).add_attribute(Attribute::Bold)
        } else {
            score_cell
        };
        table.add_row(vec![
            Cell::new(result.rank_test_score),
            Cell::new(result.params.n_estimators),
            Cell::new(depth),
            Cell::new(result.params.min_samples_split),
            score_cell,
            Cell::new(format!("{:.4}", result.std_test_score)),
            Cell::new(format!("{:.4}", result.mean_train_score)),
        ]);
    }

    table
}

/// Print the table indented under the current step
pub fn print_cv_results(results: &[CvResult], limit: usize) {
    for line in cv_results_table(results, limit).to_string().lines() {
        println!("    {}", line);
    }
}
