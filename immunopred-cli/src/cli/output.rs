//! Standard output utilities for consistent command formatting
//!
//! Status lines go to stderr so that result tables on stdout stay pipeable.

use colored::*;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color as TableColor, ContentArrangement, Table};

/// Display a section header
pub fn section_header(title: &str) {
    println!("\n{}", title.bold().cyan());
}

/// Display an info message
pub fn info(message: &str) {
    eprintln!("{} {}", "●".blue(), message);
}

/// Display a warning message
pub fn warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}

/// Display an empty/none indicator
pub fn empty(message: &str) {
    eprintln!("{} {}", "◌".dimmed(), message);
}

/// Tree structure item
pub fn tree_item(is_last: bool, label: &str, value: Option<&str>) {
    let prefix = if is_last { "└─" } else { "├─" };
    if let Some(val) = value {
        println!("{} {}: {}", prefix.dimmed(), label, val);
    } else {
        println!("{} {}", prefix.dimmed(), label);
    }
}

/// Create a standard table with consistent styling
pub fn create_standard_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Create a standard header cell
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .add_attribute(Attribute::Bold)
        .fg(TableColor::Cyan)
}

/// Score cell, four decimals; strong binders highlighted
pub fn score_cell(score: Option<f64>) -> Cell {
    match score {
        Some(s) if s >= STRONG_BINDER => Cell::new(format!("{:.4}", s)).fg(TableColor::Green),
        Some(s) => Cell::new(format!("{:.4}", s)),
        None => Cell::new("-").fg(TableColor::DarkGrey),
    }
}

/// 1-log50k score of a 50 nM binder
const STRONG_BINDER: f64 = 0.638;

/// Compact `8-11` style rendering of a length list
pub fn format_lengths(lengths: &[usize]) -> String {
    match (lengths.first(), lengths.last()) {
        (Some(first), Some(last))
            if lengths.len() > 1 && last - first + 1 == lengths.len() =>
        {
            format!("{}-{}", first, last)
        }
        _ => lengths
            .iter()
            .map(usize::to_string)
            .collect::<Vec<_>>()
            .join(","),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_lengths() {
        assert_eq!(format_lengths(&[8, 9, 10, 11]), "8-11");
        assert_eq!(format_lengths(&[15]), "15");
        assert_eq!(format_lengths(&[8, 10]), "8,10");
        assert_eq!(format_lengths(&[]), "");
    }
}
