//! The comparison run: load, filter, classify, report.

use crate::cli::Cli;
use crate::compare::compare;
use crate::config::{self, CompareConfig};
use crate::error::Result;
use crate::loader::BaselineLoader;
use crate::model::Report;
use crate::report::{write_artifacts, write_summary};
use std::io;
use tracing::info;

/// Execute the comparison described by `cli`.
///
/// Artifacts are written only after both baselines loaded and every
/// benchmark was classified.
///
/// # Errors
///
/// Returns an error if configuration is invalid, a baseline is missing or
/// malformed, a base timing is zero, or an artifact cannot be written.
pub fn execute(cli: &Cli) -> Result<()> {
    let config = config::load_config(cli.config.as_deref(), &cli.overrides())?;
    info!(
        base = %cli.base,
        pr = %cli.pr,
        threshold = config.threshold,
        criterion_dir = %config.criterion_dir.display(),
        "Comparing baselines"
    );

    let report = build_report(&cli.base, &cli.pr, &config)?;
    write_artifacts(&report, &config.artifacts)?;

    if !cli.quiet {
        write_summary(&report, config.subject.marker(), io::stdout().lock())?;
    }
    Ok(())
}

/// Build the report for `base` versus `pr` without writing anything.
///
/// # Errors
///
/// Returns an error if a baseline is missing or malformed, or a base timing
/// is zero.
pub fn build_report(base: &str, pr: &str, config: &CompareConfig) -> Result<Report> {
    let loader = BaselineLoader::new(&config.criterion_dir);
    let (base_snapshot, pr_snapshot) = loader.load_pair(base, pr)?;

    let results = compare(&base_snapshot, &pr_snapshot, config.threshold, &config.subject)?;
    let report = Report::new(results, config.threshold);
    info!(
        total = report.total,
        regressions = report.regressions,
        improvements = report.improvements,
        "Comparison complete"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::SubjectFilter;
    use crate::model::Outcome;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn write_estimate(root: &Path, rel: &str, mean_ns: f64) {
        let dir = root.join(rel);
        fs::create_dir_all(&dir).unwrap();
        let body = format!("{{\"mean\":{{\"point_estimate\":{mean_ns}}}}}");
        fs::write(dir.join("estimates.json"), body).unwrap();
    }

    fn config_for(root: &Path) -> CompareConfig {
        CompareConfig {
            criterion_dir: root.to_path_buf(),
            ..CompareConfig::default()
        }
    }

    #[test]
    fn build_report_filters_to_subject() {
        crate::logging::init_test_logging();
        let tmp = TempDir::new().unwrap();
        write_estimate(tmp.path(), "status/gitr/small/main", 100.0);
        write_estimate(tmp.path(), "status/gitr/small/pr", 120.0);
        write_estimate(tmp.path(), "status/git/small/main", 100.0);
        write_estimate(tmp.path(), "status/git/small/pr", 50.0);

        let report = build_report("main", "pr", &config_for(tmp.path())).unwrap();
        assert_eq!(report.total, 1);
        assert!(report.has_regression);
        assert_eq!(report.results[0].status, Outcome::Regression);
        assert_eq!(report.results[0].pct_change, Some(20.0));
    }

    #[test]
    fn build_report_all_benchmarks() {
        let tmp = TempDir::new().unwrap();
        write_estimate(tmp.path(), "status/git/small/main", 100.0);
        write_estimate(tmp.path(), "status/git/small/pr", 50.0);

        let config = CompareConfig {
            subject: SubjectFilter::All,
            ..config_for(tmp.path())
        };
        let report = build_report("main", "pr", &config).unwrap();
        assert_eq!(report.improvements, 1);
        assert!(!report.has_regression);
    }

    #[test]
    fn build_report_baseline_with_only_reference_benchmarks_is_empty_report() {
        let tmp = TempDir::new().unwrap();
        write_estimate(tmp.path(), "status/git/main", 100.0);
        write_estimate(tmp.path(), "status/git/pr", 100.0);

        let report = build_report("main", "pr", &config_for(tmp.path())).unwrap();
        assert_eq!(report.total, 0);
        assert!(!report.has_regression);
    }
}
