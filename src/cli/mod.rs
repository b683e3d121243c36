//! CLI definitions and entry point.

use crate::config::CliOverrides;
use clap::Parser;
use std::path::PathBuf;

pub mod compare;

/// Compare two Criterion baselines and report regressions.
///
/// Writes bench-results.json and bench-results.md. Regressions are reported
/// in `has_regression`, not in the exit code.
#[derive(Parser, Debug)]
#[command(name = "bench-compare", author, version, about, long_about = None)]
pub struct Cli {
    /// Base baseline name (e.g. "main")
    #[arg(long, env = "BENCH_COMPARE_BASE")]
    pub base: String,

    /// PR baseline name (e.g. "pr")
    #[arg(long, env = "BENCH_COMPARE_PR")]
    pub pr: String,

    /// Regression threshold in percent [default: 5.0]
    #[arg(long, allow_negative_numbers = true)]
    pub threshold: Option<f64>,

    /// Criterion output directory [default: target/criterion]
    #[arg(long)]
    pub criterion_dir: Option<PathBuf>,

    /// Marker token of the implementation under test [default: gitr]
    ///
    /// Also turns off an `all-benchmarks` setting from the config file or
    /// environment.
    #[arg(long, conflicts_with = "all_benchmarks")]
    pub subject: Option<String>,

    /// Compare every benchmark, not only the subject's
    #[arg(long)]
    pub all_benchmarks: bool,

    /// Path of the JSON report [default: bench-results.json]
    #[arg(long)]
    pub json_output: Option<PathBuf>,

    /// Path of the Markdown report [default: bench-results.md]
    #[arg(long)]
    pub markdown_output: Option<PathBuf>,

    /// Config file (default: ./bench-compare.yaml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Emit errors as JSON on stderr
    #[arg(long)]
    pub json: bool,

    /// Write logs as JSON lines to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (no summary, errors only)
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Flags that take part in config precedence.
    #[must_use]
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            threshold: self.threshold,
            criterion_dir: self.criterion_dir.clone(),
            subject: self.subject.clone(),
            all_benchmarks: self.all_benchmarks.then_some(true),
            json_output: self.json_output.clone(),
            markdown_output: self.markdown_output.clone(),
        }
    }
}
