//! Baseline loading from a Criterion result tree.
//!
//! Criterion stores one estimates file per benchmark per baseline:
//!
//! ```text
//! <root>/<group>/<bench_id>[/<param>]/<baseline>/estimates.json
//! ```
//!
//! The benchmark identity is every path segment before the baseline
//! directory, e.g. `status/gitr/small` for
//! `target/criterion/status/gitr/small/main/estimates.json`.

use crate::error::{CompareError, Result};
use crate::model::{BenchmarkId, Snapshot};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, trace, warn};
use walkdir::WalkDir;

/// Name of the per-benchmark data file.
pub const ESTIMATES_FILE: &str = "estimates.json";

/// Default result tree root, relative to the working directory.
pub const DEFAULT_CRITERION_DIR: &str = "target/criterion";

/// Criterion writes relative-change estimates under this directory name.
/// It sits where a baseline would but is not one.
const CHANGE_DIR: &str = "change";

#[derive(Debug, Deserialize)]
struct Estimates {
    mean: Estimate,
}

#[derive(Debug, Deserialize)]
struct Estimate {
    point_estimate: f64,
}

/// Reads baselines out of one result tree.
#[derive(Debug, Clone)]
pub struct BaselineLoader {
    root: PathBuf,
}

impl BaselineLoader {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Load the snapshot for `baseline`.
    ///
    /// A missing root yields an empty snapshot. Duplicate identities keep the
    /// last value visited.
    ///
    /// # Errors
    ///
    /// Returns an error if any matching estimates file is unreadable or
    /// malformed.
    pub fn load(&self, baseline: &str) -> Result<Snapshot> {
        let mut snapshot = Snapshot::new();

        for (dir, file) in self.estimate_files() {
            let segments = relative_segments(&self.root, &dir);
            let Some(id) = identity_for(&segments, baseline) else {
                trace!(dir = %dir.display(), baseline, "Skipping directory");
                continue;
            };

            let mean_ns = read_mean_ns(&file)?;
            debug!(benchmark = %id, mean_ns, "Loaded estimate");
            if let Some(previous) = snapshot.insert(id, mean_ns) {
                debug!(previous, "Duplicate benchmark identity; keeping later value");
            }
        }

        info!(
            baseline,
            root = %self.root.display(),
            benchmarks = snapshot.len(),
            "Loaded baseline"
        );
        Ok(snapshot)
    }

    /// Load the base and PR baselines, treating an empty one as fatal.
    ///
    /// Both are read before either is checked, so a malformed file is
    /// reported ahead of a missing baseline.
    ///
    /// # Errors
    ///
    /// Returns [`CompareError::MissingBaseline`] for the first empty
    /// snapshot (base before PR), plus any error from
    /// [`BaselineLoader::load`].
    pub fn load_pair(&self, base: &str, pr: &str) -> Result<(Snapshot, Snapshot)> {
        let base_snapshot = self.load(base)?;
        let pr_snapshot = self.load(pr)?;

        for (role, name, snapshot) in [("base", base, &base_snapshot), ("PR", pr, &pr_snapshot)] {
            if snapshot.is_empty() {
                let available = self.available_baselines();
                return Err(CompareError::missing_baseline(
                    role,
                    name,
                    self.root.clone(),
                    available,
                ));
            }
        }
        Ok((base_snapshot, pr_snapshot))
    }

    /// Names of every baseline directory holding an estimates file.
    #[must_use]
    pub fn available_baselines(&self) -> Vec<String> {
        let names: BTreeSet<String> = self
            .estimate_files()
            .into_iter()
            .filter_map(|(dir, _)| {
                relative_segments(&self.root, &dir)
                    .last()
                    .filter(|name| name.as_str() != CHANGE_DIR)
                    .cloned()
            })
            .collect();
        names.into_iter().collect()
    }

    /// Every `(directory, estimates file)` pair under the root, in a stable
    /// order. Entries that cannot be read are skipped.
    fn estimate_files(&self) -> Vec<(PathBuf, PathBuf)> {
        if !self.root.is_dir() {
            warn!(root = %self.root.display(), "Result tree root does not exist");
            return Vec::new();
        }

        let mut found = Vec::new();
        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(
                        path = ?err.path().map(Path::display),
                        error = %err,
                        "Skipping unreadable entry in result tree"
                    );
                    continue;
                }
            };
            if entry.file_type().is_dir() || entry.file_name() != ESTIMATES_FILE {
                continue;
            }
            let Some(dir) = entry.path().parent() else {
                continue;
            };
            found.push((dir.to_path_buf(), entry.path().to_path_buf()));
        }
        found
    }
}

/// Path segments of `dir` relative to `root`.
fn relative_segments(root: &Path, dir: &Path) -> Vec<String> {
    let relative = dir.strip_prefix(root).unwrap_or(dir);
    relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect()
}

/// Index of the first segment equal to `baseline`.
///
/// Linear scan, O(depth); depth is the nesting of the result tree.
fn baseline_position(segments: &[String], baseline: &str) -> Option<usize> {
    segments.iter().position(|segment| segment == baseline)
}

/// Identity for a directory: the segments before the baseline segment.
///
/// `None` if the baseline is absent or is the first segment.
fn identity_for(segments: &[String], baseline: &str) -> Option<BenchmarkId> {
    match baseline_position(segments, baseline)? {
        0 => None,
        idx => Some(BenchmarkId::new(segments[..idx].iter().cloned())),
    }
}

/// Read `mean.point_estimate` from an estimates file.
fn read_mean_ns(path: &Path) -> Result<f64> {
    let contents = fs::read_to_string(path)?;
    let estimates: Estimates =
        serde_json::from_str(&contents).map_err(|err| CompareError::MalformedEstimate {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;

    let mean_ns = estimates.mean.point_estimate;
    if mean_ns < 0.0 {
        return Err(CompareError::MalformedEstimate {
            path: path.to_path_buf(),
            reason: format!("mean.point_estimate is negative ({mean_ns})"),
        });
    }
    Ok(mean_ns)
}
