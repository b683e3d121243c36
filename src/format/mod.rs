//! Output formatting for `bench_compare`.
//!
//! - [`text`] - Human-scaled timings and signed percentages
//! - [`markdown`] - PR comment document
//! - [`console`] - Terse stdout summary
//!
//! The JSON document is the serde form of [`crate::model::Report`].

pub mod console;
pub mod markdown;
pub mod text;

pub use console::render_summary;
pub use markdown::{render_markdown, status_label};
pub use text::{format_ns, format_ns_or_dash, format_number, format_pct};
