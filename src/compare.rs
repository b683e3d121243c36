//! Pairing and classification of two baseline snapshots.

use crate::error::{CompareError, Result};
use crate::filter::SubjectFilter;
use crate::model::{BenchmarkId, Comparison, Outcome, Snapshot};
use std::collections::BTreeSet;
use tracing::debug;

/// Default regression threshold in percent.
pub const DEFAULT_THRESHOLD: f64 = 5.0;

/// Percentage change from `base` to `candidate`. Positive means slower.
#[must_use]
pub fn percent_change(base: f64, candidate: f64) -> f64 {
    (candidate - base) / base * 100.0
}

/// Classify an unrounded percentage change.
///
/// Strict on both sides: a change equal to `threshold` (or `-threshold`) is
/// `Ok`. The threshold is used as given, even when zero or negative.
#[must_use]
pub fn classify(pct: f64, threshold: f64) -> Outcome {
    if pct > threshold {
        Outcome::Regression
    } else if pct < -threshold {
        Outcome::Improvement
    } else {
        Outcome::Ok
    }
}

/// Compare `candidate` against `base`.
///
/// Covers every identity in either snapshot that passes `filter`, ordered by
/// identity.
///
/// # Errors
///
/// Returns [`CompareError::ZeroBaseTiming`] if a benchmark present in both
/// snapshots has a base timing of zero.
pub fn compare(
    base: &Snapshot,
    candidate: &Snapshot,
    threshold: f64,
    filter: &SubjectFilter,
) -> Result<Vec<Comparison>> {
    let keys: BTreeSet<&BenchmarkId> = base
        .keys()
        .chain(candidate.keys())
        .filter(|id| filter.belongs_to_subject(id))
        .collect();

    let mut results = Vec::with_capacity(keys.len());
    for id in keys {
        let row = match (base.get(id), candidate.get(id)) {
            (None, Some(&pr_ns)) => Comparison::new_benchmark(id.clone(), pr_ns),
            (Some(&base_ns), None) => Comparison::removed(id.clone(), base_ns),
            (Some(&base_ns), Some(&pr_ns)) => {
                if base_ns == 0.0 {
                    return Err(CompareError::ZeroBaseTiming {
                        benchmark: id.to_string(),
                    });
                }
                let pct = percent_change(base_ns, pr_ns);
                Comparison::measured(id.clone(), base_ns, pr_ns, pct, classify(pct, threshold))
            }
            (None, None) => continue,
        };
        debug!(benchmark = %row.benchmark, status = %row.status, pct = ?row.pct_change, "Classified");
        results.push(row);
    }

    Ok(results)
}
