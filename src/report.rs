//! Writing the report artifacts.
//!
//! Rendering goes through `io::Write` sinks so tests can capture output in
//! memory; [`write_artifacts`] binds the sinks to files.

use crate::error::Result;
use crate::format::{render_markdown, render_summary};
use crate::model::Report;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Default JSON artifact path, relative to the working directory.
pub const DEFAULT_JSON_OUTPUT: &str = "bench-results.json";
/// Default Markdown artifact path, relative to the working directory.
pub const DEFAULT_MARKDOWN_OUTPUT: &str = "bench-results.md";

/// Where the two artifacts go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub json: PathBuf,
    pub markdown: PathBuf,
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self {
            json: PathBuf::from(DEFAULT_JSON_OUTPUT),
            markdown: PathBuf::from(DEFAULT_MARKDOWN_OUTPUT),
        }
    }
}

/// Write the JSON document, two-space indented.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn write_json<W: Write>(report: &Report, mut out: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, report)?;
    out.flush()?;
    Ok(())
}

/// Write the Markdown document.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn write_markdown<W: Write>(report: &Report, mut out: W) -> Result<()> {
    out.write_all(render_markdown(report).as_bytes())?;
    out.flush()?;
    Ok(())
}

/// Write the console summary.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn write_summary<W: Write>(report: &Report, subject: Option<&str>, mut out: W) -> Result<()> {
    out.write_all(render_summary(report, subject).as_bytes())?;
    out.flush()?;
    Ok(())
}

/// Write both artifacts to `paths`, replacing existing files.
///
/// # Errors
///
/// Returns an error if a file cannot be created or written.
pub fn write_artifacts(report: &Report, paths: &ArtifactPaths) -> Result<()> {
    write_json(report, create(&paths.json)?)?;
    info!(path = %paths.json.display(), "Wrote JSON report");

    write_markdown(report, create(&paths.markdown)?)?;
    info!(path = %paths.markdown.display(), "Wrote Markdown report");
    Ok(())
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(BufWriter::new(File::create(path)?))
}
