use std::path::Path;

use colored::Colorize;

use megs_mechanics::{TableData, validate_tables};

pub fn run(path: &Path) -> Result<(), String> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    let data: TableData =
        serde_json::from_str(&json).map_err(|e| format!("{}: {e}", path.display()))?;

    let issues = validate_tables(&data);
    if issues.is_empty() {
        println!("  All checks passed for '{}'.", path.display());
        println!(
            "  {} range bands, {} action rows, {} result rows",
            data.ranges.len(),
            data.action_table.len(),
            data.result_table.len()
        );
        return Ok(());
    }

    for issue in &issues {
        println!("  {} {issue}", "x".red().bold());
    }
    Err(format!(
        "{} problem(s) found in {}",
        issues.len(),
        path.display()
    ))
}
