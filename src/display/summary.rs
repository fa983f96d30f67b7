//! Spending summary display

use crate::services::SpendingSummary;

use super::{format_amount, truncate};

const BAR_WIDTH: usize = 20;

/// Format a spending summary under a heading naming the time window
pub fn format_summary(summary: &SpendingSummary, window: &str, currency: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Spending: {}\n", window));
    output.push_str(&format!("{}\n", "=".repeat(40)));
    output.push_str(&format!(
        "Total:     {} ({} expenses)\n",
        format_amount(summary.total, currency),
        summary.count
    ));

    if summary.spending_limit.is_positive() {
        let filled = ((summary.limit_progress / 100.0) * BAR_WIDTH as f64).round() as usize;
        output.push_str(&format!(
            "Limit:     {}  [{}{}] {:.0}%{}\n",
            format_amount(summary.spending_limit, currency),
            "#".repeat(filled),
            ".".repeat(BAR_WIDTH - filled),
            summary.limit_progress,
            if summary.over_limit() { "  OVER LIMIT" } else { "" }
        ));
    }

    if summary.by_category.is_empty() {
        return output;
    }

    output.push('\n');
    for category in &summary.by_category {
        output.push_str(&format!(
            "  {:<20}  {:>12}  {:>4}\n",
            truncate(&category.category, 20),
            format_amount(category.total, currency),
            category.count
        ));
    }

    output
}
