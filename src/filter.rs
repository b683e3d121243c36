//! Subsystem filter: which benchmarks measure the subject under test.
//!
//! A result tree usually holds the subject next to a reference
//! implementation (e.g. `status/gitr/small` beside `status/git/small`).
//! Only the subject's benchmarks are compared.

use crate::model::BenchmarkId;

/// Default marker token for the subject under test.
pub const DEFAULT_SUBJECT: &str = "gitr";

/// Predicate deciding whether a benchmark belongs to the subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubjectFilter {
    /// Accept every benchmark.
    All,
    /// Accept benchmarks with a segment matching this marker.
    Marker(String),
}

impl Default for SubjectFilter {
    fn default() -> Self {
        Self::Marker(DEFAULT_SUBJECT.to_string())
    }
}

impl SubjectFilter {
    /// True iff some segment equals the marker, or starts with the marker
    /// followed by `_` or `/`.
    ///
    /// Matching is case-sensitive and anchored at the segment start, so
    /// `gitrx` and `legitr` do not match `gitr`.
    #[must_use]
    pub fn belongs_to_subject(&self, id: &BenchmarkId) -> bool {
        match self {
            Self::All => true,
            Self::Marker(marker) => id
                .segments()
                .iter()
                .any(|segment| segment_matches(segment, marker)),
        }
    }

    /// Marker token, if any. Used in console output.
    #[must_use]
    pub fn marker(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Marker(marker) => Some(marker),
        }
    }
}

fn segment_matches(segment: &str, marker: &str) -> bool {
    segment
        .strip_prefix(marker)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('_') || rest.starts_with('/'))
}
