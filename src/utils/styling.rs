//! Terminal styling utilities for step-by-step run output

use console::{style, Emoji};

use crate::cli::RunConfig;

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", ">> ");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");
pub static SAVE: Emoji<'_, '_> = Emoji("💾 ", "");
pub static DICE: Emoji<'_, '_> = Emoji("🎲 ", "");
pub static TREE: Emoji<'_, '_> = Emoji("🌲 ", "");

/// Print the application banner
pub fn print_banner(version: &str) {
    let banner = r#"
     _   _ _              _         __                   _
    | |_(_) |_ __ _ _ __ (_) ___   / _| ___  _ __ ___ ___| |_
    | __| | __/ _` | '_ \| |/ __| | |_ / _ \| '__/ _ \ __| __|
    | |_| | || (_| | | | | | (__  |  _| (_) | | |  __\__ \ |_
     \__|_|\__\__,_|_| |_|_|\___| |_|  \___/|_|  \___|___/\__|
    "#;

    println!();
    println!("{}", style(banner).cyan().bold());
    println!(
        "    {} {}",
        TREE,
        style("Grid-searched random forests for survival prediction").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Print configuration card
pub fn print_config(config: &RunConfig) {
    let box_width = 56;
    let line = "─".repeat(box_width - 2);

    println!("    ┌{}┐", line);
    println!(
        "    │ {}{}│",
        style("⚙️  Configuration").cyan().bold(),
        " ".repeat(box_width - 20)
    );
    println!("    ├{}┤", line);
    println!(
        "    │  {} Train:   {:<38}│",
        FOLDER,
        truncate_path(&config.train_path, 37)
    );
    println!(
        "    │  {} Predict: {:<38}│",
        FOLDER,
        truncate_path(&config.predict_path, 37)
    );
    println!(
        "    │  {} Output:  {:<38}│",
        SAVE,
        truncate_path(&config.output_path, 37)
    );
    println!("    ├{}┤", line);
    println!(
        "    │  {} Seed / test size:   {:<27}│",
        DICE,
        style(format!("{} / {:.0}%", config.seed, config.test_size * 100.0)).yellow()
    );
    println!(
        "    │  {} Grid / CV folds:    {:<27}│",
        TREE,
        style(format!("{} combos / {}", config.grid.len(), config.cv_folds)).yellow()
    );
    println!("    └{}┘", line);
    println!();
}

/// Print a step header with styling
pub fn print_step_header(step_num: u8, title: &str) {
    println!();
    println!(
        "    {} {} {}",
        style(format!("STEP {}", step_num)).cyan().bold(),
        style("│").dim(),
        style(title).white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {} {}", INFO, message);
}

/// Print a labelled value
pub fn print_metric(label: &str, value: impl std::fmt::Display) {
    println!("      {}: {}", label, style(value).yellow().bold());
}

/// Print elapsed time for a step
pub fn print_step_time(elapsed: std::time::Duration) {
    println!(
        "    {}",
        style(format!("⏱  {:.2}s", elapsed.as_secs_f64())).dim()
    );
}

/// Print the final completion message
pub fn print_completion() {
    println!();
    println!(
        "    {} {}",
        ROCKET,
        style("Titanic-forest run complete!").green().bold()
    );
    println!();
}

// Helper functions

fn truncate_path(path: &std::path::Path, max_len: usize) -> String {
    let path_str = path.display().to_string();
    truncate_string(&path_str, max_len)
}

fn truncate_string(s: &str, max_len: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= max_len {
        s.to_string()
    } else {
        let tail: String = chars[chars.len() - (max_len - 3)..].iter().collect();
        format!("...{}", tail)
    }
}
