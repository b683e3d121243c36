//! Markdown rendering of a report, for posting as a PR comment.

use super::text::{format_ns_or_dash, format_number, format_pct};
use crate::model::{Comparison, Outcome, Report};

const CHANGE_TABLE_HEADER: [&str; 2] = [
    "| Benchmark | Base | PR | Change |",
    "|-----------|------|-----|--------|",
];

const FULL_TABLE_HEADER: [&str; 2] = [
    "| Benchmark | Base | PR | Change | Status |",
    "|-----------|------|-----|--------|--------|",
];

/// Status word for the header line.
#[must_use]
pub const fn status_label(report: &Report) -> &'static str {
    if report.has_regression { "FAIL" } else { "PASS" }
}

/// Render the full Markdown document.
#[must_use]
pub fn render_markdown(report: &Report) -> String {
    let mut lines: Vec<String> = vec![
        "## Benchmark Results".to_string(),
        format!(
            "**Threshold**: {}% | **Status**: {}",
            format_number(report.threshold),
            status_label(report)
        ),
        format!(
            "### Summary: {} benchmarks, {} regressions, {} improvements",
            report.total, report.regressions, report.improvements
        ),
        String::new(),
    ];

    push_change_table(&mut lines, "Regressions", report, Outcome::Regression);
    push_change_table(&mut lines, "Improvements", report, Outcome::Improvement);
    push_name_list(&mut lines, "New benchmarks", report, Outcome::New);
    push_name_list(&mut lines, "Removed benchmarks", report, Outcome::Removed);

    lines.push("<details>".to_string());
    lines.push("<summary>All Results</summary>".to_string());
    lines.push(String::new());
    lines.extend(FULL_TABLE_HEADER.iter().map(ToString::to_string));
    lines.extend(report.results.iter().map(full_row));
    lines.push(String::new());
    lines.push("</details>".to_string());
    lines.push(String::new());

    lines.join("\n")
}

fn push_change_table(lines: &mut Vec<String>, title: &str, report: &Report, status: Outcome) {
    let rows: Vec<&Comparison> = report.with_status(status).collect();
    if rows.is_empty() {
        return;
    }

    lines.push(format!("### {title}"));
    lines.push(String::new());
    lines.extend(CHANGE_TABLE_HEADER.iter().map(ToString::to_string));
    for row in rows {
        lines.push(format!(
            "| `{}` | {} | {} | {} |",
            row.benchmark,
            format_ns_or_dash(row.base_ns),
            format_ns_or_dash(row.pr_ns),
            change_cell(row)
        ));
    }
    lines.push(String::new());
}

fn push_name_list(lines: &mut Vec<String>, title: &str, report: &Report, status: Outcome) {
    let names: Vec<String> = report
        .with_status(status)
        .map(|row| format!("`{}`", row.benchmark))
        .collect();
    if names.is_empty() {
        return;
    }

    lines.push(format!("**{title}**: {}", names.join(", ")));
    lines.push(String::new());
}

fn full_row(row: &Comparison) -> String {
    format!(
        "| `{}` | {} | {} | {} | {} |",
        row.benchmark,
        format_ns_or_dash(row.base_ns),
        format_ns_or_dash(row.pr_ns),
        change_cell(row),
        row.status
    )
}

/// Signed percentage, or the status word when there is no percentage.
fn change_cell(row: &Comparison) -> String {
    row.pct_change
        .map_or_else(|| row.status.to_string(), format_pct)
}
