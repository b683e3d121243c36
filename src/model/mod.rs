//! Core data types for `bench_compare`.
//!
//! - `BenchmarkId` - Structural key of one benchmark configuration
//! - `Snapshot` - Mean timing per benchmark for one named baseline
//! - `Outcome` - Classification of one compared benchmark
//! - `Comparison` - One row of the comparison
//! - `Report` - Aggregate over all rows

use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Ordered path segments identifying one benchmark, e.g. `status/gitr/small`.
///
/// Ordering is lexicographic over segments, not over the joined string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BenchmarkId(Vec<String>);

impl BenchmarkId {
    /// Build an identity from its segments.
    #[must_use]
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// Parse a `/`-joined identity. Empty segments are dropped.
    #[must_use]
    pub fn parse(joined: &str) -> Self {
        Self::new(joined.split('/').filter(|segment| !segment.is_empty()))
    }

    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for BenchmarkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}

impl Serialize for BenchmarkId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Mean timing in nanoseconds per benchmark, for one baseline.
pub type Snapshot = BTreeMap<BenchmarkId, f64>;

/// Classification of a single compared benchmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    Regression,
    Improvement,
    Ok,
    New,
    Removed,
}

impl Outcome {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Regression => "REGRESSION",
            Self::Improvement => "IMPROVEMENT",
            Self::Ok => "OK",
            Self::New => "NEW",
            Self::Removed => "REMOVED",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One compared benchmark.
///
/// Construct through [`Comparison::new_benchmark`], [`Comparison::removed`]
/// or [`Comparison::measured`]; they keep `pct_change` present iff both
/// timings are.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub benchmark: BenchmarkId,
    pub base_ns: Option<f64>,
    pub pr_ns: Option<f64>,
    /// Percentage change rounded to two decimals.
    pub pct_change: Option<f64>,
    pub status: Outcome,
}

impl Comparison {
    /// Benchmark only present in the candidate baseline.
    #[must_use]
    pub const fn new_benchmark(benchmark: BenchmarkId, pr_ns: f64) -> Self {
        Self {
            benchmark,
            base_ns: None,
            pr_ns: Some(pr_ns),
            pct_change: None,
            status: Outcome::New,
        }
    }

    /// Benchmark only present in the base baseline.
    #[must_use]
    pub const fn removed(benchmark: BenchmarkId, base_ns: f64) -> Self {
        Self {
            benchmark,
            base_ns: Some(base_ns),
            pr_ns: None,
            pct_change: None,
            status: Outcome::Removed,
        }
    }

    /// Benchmark present in both baselines. `pct` is the unrounded change
    /// that `status` was derived from.
    #[must_use]
    pub fn measured(benchmark: BenchmarkId, base_ns: f64, pr_ns: f64, pct: f64, status: Outcome) -> Self {
        Self {
            benchmark,
            base_ns: Some(base_ns),
            pr_ns: Some(pr_ns),
            pct_change: Some(round2(pct)),
            status,
        }
    }
}

/// Round the exact binary value to two decimal places, ties to even.
/// Negative zero collapses to zero.
#[must_use]
pub fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse::<f64>().unwrap_or(value) + 0.0
}

/// Aggregate report over an ordered list of comparisons.
///
/// Field order is the order of the JSON document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub has_regression: bool,
    pub threshold: f64,
    pub total: usize,
    pub regressions: usize,
    pub improvements: usize,
    pub results: Vec<Comparison>,
}

impl Report {
    #[must_use]
    pub fn new(results: Vec<Comparison>, threshold: f64) -> Self {
        let regressions = count(&results, Outcome::Regression);
        let improvements = count(&results, Outcome::Improvement);
        Self {
            has_regression: regressions > 0,
            threshold,
            total: results.len(),
            regressions,
            improvements,
            results,
        }
    }

    /// Rows with the given outcome, in report order.
    pub fn with_status(&self, status: Outcome) -> impl Iterator<Item = &Comparison> {
        self.results.iter().filter(move |row| row.status == status)
    }
}

fn count(results: &[Comparison], status: Outcome) -> usize {
    results.iter().filter(|row| row.status == status).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn benchmark_id_orders_by_segment() {
        // "a-b" sorts before "a/b" as strings, but after it segment-wise.
        let nested = BenchmarkId::new(["a", "b"]);
        let dashed = BenchmarkId::new(["a-b"]);
        assert!(nested < dashed);
    }

    #[test]
    fn benchmark_id_display_and_parse() {
        let id = BenchmarkId::parse("status/gitr/small");
        assert_eq!(id.segments().len(), 3);
        assert_eq!(id.to_string(), "status/gitr/small");
        assert!(BenchmarkId::parse("").segments().is_empty());
    }

    #[test]
    fn outcome_serializes_upper_case() {
        let json = serde_json::to_string(&Outcome::Improvement).unwrap();
        assert_eq!(json, "\"IMPROVEMENT\"");
        assert_eq!(Outcome::Ok.to_string(), "OK");
    }

    #[test]
    fn comparison_serializes_identity_as_string() {
        let row = Comparison::new_benchmark(BenchmarkId::parse("init/gitr"), 50.0);
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["benchmark"], "init/gitr");
        assert!(json["base_ns"].is_null());
        assert!(json["pct_change"].is_null());
        assert_eq!(json["status"], "NEW");
    }

    #[test]
    fn measured_rounds_pct_to_two_decimals() {
        let row = Comparison::measured(
            BenchmarkId::parse("a"),
            300.0,
            337.0,
            12.333_333,
            Outcome::Regression,
        );
        assert_eq!(row.pct_change, Some(12.33));
    }

    #[test]
    fn round2_drops_negative_zero() {
        assert!(round2(-0.001).is_sign_positive());
        assert_eq!(round2(-6.004), -6.0);
    }

    #[test]
    fn round2_ties_go_to_even_on_exact_value() {
        // 3.125 and 0.375 are exact in binary
        assert_eq!(round2(3.125), 3.12);
        assert_eq!(round2(0.375), 0.38);
        assert_eq!(round2(-3.125), -3.12);
        // 1.005 is stored just below the tie
        assert_eq!(round2(1.005), 1.0);
    }

    #[test]
    fn report_counts_outcomes() {
        let rows = vec![
            Comparison::measured(BenchmarkId::parse("a"), 100.0, 106.0, 6.0, Outcome::Regression),
            Comparison::removed(BenchmarkId::parse("b"), 200.0),
            Comparison::new_benchmark(BenchmarkId::parse("c"), 50.0),
        ];
        let report = Report::new(rows, 5.0);
        assert!(report.has_regression);
        assert_eq!(report.total, 3);
        assert_eq!(report.regressions, 1);
        assert_eq!(report.improvements, 0);
        assert_eq!(report.with_status(Outcome::Removed).count(), 1);
    }
}
