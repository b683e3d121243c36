//! Terse console summary printed after the artifacts are written.

use super::text::{format_number, format_pct};
use crate::model::{Outcome, Report};

/// Render the console summary.
///
/// `subject` is the subject marker, named in the first line when present.
#[must_use]
pub fn render_summary(report: &Report, subject: Option<&str>) -> String {
    let what = subject.map_or_else(|| "benchmarks".to_string(), |s| format!("{s} benchmarks"));
    let mut out = format!(
        "Compared {} {what} (threshold: {}%)\n",
        report.total,
        format_number(report.threshold)
    );
    out.push_str(&format!("  Regressions:  {}\n", report.regressions));
    out.push_str(&format!("  Improvements: {}\n", report.improvements));

    if report.has_regression {
        out.push_str("\nRegressed benchmarks:\n");
        for row in report.with_status(Outcome::Regression) {
            let pct = row.pct_change.map_or_else(String::new, format_pct);
            out.push_str(&format!("  {}: {pct}\n", row.benchmark));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BenchmarkId, Comparison};

    #[test]
    fn summary_lists_regressions() {
        let report = Report::new(
            vec![
                Comparison::measured(
                    BenchmarkId::parse("status/gitr/small"),
                    100.0,
                    112.35,
                    12.35,
                    Outcome::Regression,
                ),
                Comparison::measured(
                    BenchmarkId::parse("init/gitr"),
                    100.0,
                    90.0,
                    -10.0,
                    Outcome::Improvement,
                ),
            ],
            5.0,
        );
        let summary = render_summary(&report, Some("gitr"));
        assert_eq!(
            summary,
            "Compared 2 gitr benchmarks (threshold: 5.0%)\n  Regressions:  1\n  Improvements: 1\n\nRegressed benchmarks:\n  status/gitr/small: +12.35%\n"
        );
    }

    #[test]
    fn summary_without_subject_or_regressions() {
        let report = Report::new(Vec::new(), 10.0);
        let summary = render_summary(&report, None);
        assert_eq!(
            summary,
            "Compared 0 benchmarks (threshold: 10.0%)\n  Regressions:  0\n  Improvements: 0\n"
        );
    }
}
