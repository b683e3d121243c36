//! Error types and handling for `bench_compare`.
//!
//! # Design
//!
//! - Uses `thiserror` for derive-based error types
//! - Provides recovery hints for user-facing errors
//! - Provides structured JSON output for CI consumers

mod structured;

pub use structured::{ErrorCode, StructuredError};

use std::path::PathBuf;
use thiserror::Error;

/// Primary error type for `bench_compare` operations.
///
/// Every variant is fatal for the run. Expected per-benchmark outcomes
/// (new, removed, regressed) are never errors.
#[derive(Error, Debug)]
pub enum CompareError {
    // === Input Errors ===
    /// A requested baseline produced no benchmarks under the result tree.
    #[error("No {role} baseline '{name}' found in {}", .root.display())]
    MissingBaseline {
        role: String,
        name: String,
        root: PathBuf,
        /// Baseline names that do exist under `root`, sorted.
        available: Vec<String>,
    },

    /// An `estimates.json` file could not be parsed.
    #[error("Malformed estimates file '{}': {reason}", .path.display())]
    MalformedEstimate { path: PathBuf, reason: String },

    /// A base timing of zero makes the percentage change undefined.
    #[error("Base timing for '{benchmark}' is zero; cannot compute percentage change")]
    ZeroBaseTiming { benchmark: String },

    // === Configuration Errors ===
    /// Configuration file or value error.
    #[error("Configuration error: {0}")]
    Config(String),

    // === I/O Errors ===
    /// File system I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl CompareError {
    /// Human-friendly suggestion for fixing this error.
    #[must_use]
    pub const fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::MissingBaseline { .. } => {
                Some("Run the benchmarks with --save-baseline <name>, or check --criterion-dir")
            }
            Self::MalformedEstimate { .. } => {
                Some("Re-run the benchmarks; the estimates file is corrupt or truncated")
            }
            Self::ZeroBaseTiming { .. } => {
                Some("A zero-duration measurement indicates corrupt input; re-run the base baseline")
            }
            Self::Config(_) | Self::Yaml(_) => Some("Check bench-compare.yaml and BENCH_COMPARE_* variables"),
            _ => None,
        }
    }

    /// Build a missing-baseline error.
    #[must_use]
    pub fn missing_baseline(
        role: impl Into<String>,
        name: impl Into<String>,
        root: impl Into<PathBuf>,
        available: Vec<String>,
    ) -> Self {
        Self::MissingBaseline {
            role: role.into(),
            name: name.into(),
            root: root.into(),
            available,
        }
    }
}

/// Result type using `CompareError`.
pub type Result<T> = std::result::Result<T, CompareError>;
