//! Criterion baseline comparison for CI.
//!
//! Pipeline: [`loader`] reads two baselines from a Criterion result tree,
//! [`filter`] keeps the subject's benchmarks, [`compare`] classifies each
//! pair against a threshold, and [`report`] writes the JSON and Markdown
//! artifacts plus a console summary.

pub mod cli;
pub mod compare;
pub mod config;
pub mod error;
pub mod filter;
pub mod format;
pub mod loader;
pub mod logging;
pub mod model;
pub mod report;

pub use error::{CompareError, ErrorCode, Result, StructuredError};
