//! Structured error output for CI consumers.
//!
//! Provides machine-parseable error information with:
//! - Error codes for categorization
//! - Hints for self-correction
//! - Context for debugging
//!
//! A CI step can run with `--json` and branch on `error.code` instead of
//! scraping stderr.

use crate::error::CompareError;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Machine-readable error codes.
///
/// These codes are stable and can be used for programmatic error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // === Input Errors (exit code 2) ===
    /// Requested baseline not present in the result tree
    MissingBaseline,
    /// Estimates file could not be parsed
    MalformedEstimate,
    /// Base measurement of zero nanoseconds
    ZeroBaseTiming,

    // === Config Errors (exit code 7) ===
    /// Configuration error
    ConfigError,
    /// Config parse error
    YamlError,

    // === I/O Errors (exit code 8) ===
    /// File I/O error
    IoError,
    /// JSON serialization error
    JsonError,
}

impl ErrorCode {
    /// Get the string representation for JSON output.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MissingBaseline => "MISSING_BASELINE",
            Self::MalformedEstimate => "MALFORMED_ESTIMATE",
            Self::ZeroBaseTiming => "ZERO_BASE_TIMING",
            Self::ConfigError => "CONFIG_ERROR",
            Self::YamlError => "YAML_ERROR",
            Self::IoError => "IO_ERROR",
            Self::JsonError => "JSON_ERROR",
        }
    }

    /// Get the exit code for this error category.
    ///
    /// - 2: Benchmark input errors
    /// - 7: Config errors
    /// - 8: I/O errors
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::MissingBaseline | Self::MalformedEstimate | Self::ZeroBaseTiming => 2,
            Self::ConfigError | Self::YamlError => 7,
            Self::IoError | Self::JsonError => 8,
        }
    }
}

/// Structured error for machine-parseable output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// Machine-readable error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional hint for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// Additional context data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
}

impl StructuredError {
    /// Create a new structured error from a `CompareError`.
    #[must_use]
    pub fn from_error(err: &CompareError) -> Self {
        let (code, context) = Self::extract_code_and_context(err);
        let hint = Self::generate_hint(err);

        Self {
            code,
            message: err.to_string(),
            hint,
            context,
        }
    }

    /// Serialize to JSON value.
    #[must_use]
    pub fn to_json(&self) -> Value {
        json!({
            "error": {
                "code": self.code.as_str(),
                "message": self.message,
                "hint": self.hint,
                "context": self.context,
            }
        })
    }

    /// Format for human-readable output.
    #[must_use]
    pub fn to_human(&self, color: bool) -> String {
        let mut output = String::new();

        if color {
            output.push_str("\x1b[31mError:\x1b[0m ");
        } else {
            output.push_str("Error: ");
        }

        output.push_str(&self.message);

        if let Some(hint) = &self.hint {
            output.push('\n');
            if color {
                output.push_str("\x1b[33mHint:\x1b[0m ");
            } else {
                output.push_str("Hint: ");
            }
            output.push_str(hint);
        }

        output
    }

    fn extract_code_and_context(err: &CompareError) -> (ErrorCode, Option<Value>) {
        match err {
            CompareError::MissingBaseline {
                role,
                name,
                root,
                available,
            } => (
                ErrorCode::MissingBaseline,
                Some(json!({
                    "role": role,
                    "baseline": name,
                    "criterion_dir": root.display().to_string(),
                    "available_baselines": available,
                })),
            ),
            CompareError::MalformedEstimate { path, reason } => (
                ErrorCode::MalformedEstimate,
                Some(json!({"path": path.display().to_string(), "reason": reason})),
            ),
            CompareError::ZeroBaseTiming { benchmark } => (
                ErrorCode::ZeroBaseTiming,
                Some(json!({"benchmark": benchmark})),
            ),
            CompareError::Config(_) => (ErrorCode::ConfigError, None),
            CompareError::Yaml(_) => (ErrorCode::YamlError, None),
            CompareError::Io(_) => (ErrorCode::IoError, None),
            CompareError::Json(_) => (ErrorCode::JsonError, None),
        }
    }

    /// Generate context-aware hint from error.
    fn generate_hint(err: &CompareError) -> Option<String> {
        if let CompareError::MissingBaseline {
            name, available, ..
        } = err
        {
            let similar = find_similar_names(name, available, 3);
            if similar.len() == 1 {
                return Some(format!("Did you mean '{}'?", similar[0]));
            }
            if !similar.is_empty() {
                return Some(format!("Did you mean one of: {}?", similar.join(", ")));
            }
            if !available.is_empty() {
                return Some(format!("Available baselines: {}", available.join(", ")));
            }
        }

        err.suggestion().map(str::to_string)
    }
}

/// Compute Levenshtein edit distance between two strings.
fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_len = a.chars().count();
    let b_len = b.chars().count();

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    let mut matrix = vec![vec![0; b_len + 1]; a_len + 1];

    for (i, row) in matrix.iter_mut().enumerate().take(a_len + 1) {
        row[0] = i;
    }
    for (j, item) in matrix[0].iter_mut().enumerate().take(b_len + 1) {
        *item = j;
    }

    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    for (i, a_char) in a_chars.iter().enumerate() {
        for (j, b_char) in b_chars.iter().enumerate() {
            let cost = usize::from(a_char != b_char);
            matrix[i + 1][j + 1] = std::cmp::min(
                std::cmp::min(matrix[i][j + 1] + 1, matrix[i + 1][j] + 1),
                matrix[i][j] + cost,
            );
        }
    }

    matrix[a_len][b_len]
}

/// Find baseline names similar to the requested one.
///
/// Returns up to `max_suggestions` names with distance <= 3.
#[must_use]
pub fn find_similar_names(searched: &str, existing: &[String], max_suggestions: usize) -> Vec<String> {
    let mut candidates: Vec<(usize, &str)> = existing
        .iter()
        .map(|name| (levenshtein_distance(searched, name), name.as_str()))
        .filter(|(dist, _)| *dist <= 3)
        .collect();

    candidates.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));

    candidates
        .into_iter()
        .take(max_suggestions)
        .map(|(_, name)| name.to_string())
        .collect()
}
