//! Configuration management for `bench_compare`.
//!
//! Configuration sources and precedence (highest wins):
//! 1. CLI overrides
//! 2. Environment variables (`BENCH_COMPARE_*`)
//! 3. Config file (`--config`, else `./bench-compare.yaml`)
//! 4. Defaults

use crate::compare::DEFAULT_THRESHOLD;
use crate::error::{CompareError, Result};
use crate::filter::{DEFAULT_SUBJECT, SubjectFilter};
use crate::loader::DEFAULT_CRITERION_DIR;
use crate::report::{ArtifactPaths, DEFAULT_JSON_OUTPUT, DEFAULT_MARKDOWN_OUTPUT};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when `--config` is unset.
pub const DEFAULT_CONFIG_FILE: &str = "bench-compare.yaml";

/// Prefix for environment variable overrides.
const ENV_PREFIX: &str = "BENCH_COMPARE_";

const KEY_THRESHOLD: &str = "threshold";
const KEY_CRITERION_DIR: &str = "criterion-dir";
const KEY_SUBJECT: &str = "subject";
const KEY_ALL_BENCHMARKS: &str = "all-benchmarks";
const KEY_JSON_OUTPUT: &str = "json-output";
const KEY_MARKDOWN_OUTPUT: &str = "markdown-output";

/// Nested YAML spellings accepted for flat keys.
const KEY_ALIASES: &[(&str, &str)] = &[
    ("output.json", KEY_JSON_OUTPUT),
    ("output.markdown", KEY_MARKDOWN_OUTPUT),
    ("output.md", KEY_MARKDOWN_OUTPUT),
];

/// A flat key/value configuration layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigLayer {
    pub values: HashMap<String, String>,
}

impl ConfigLayer {
    /// Merge another layer on top of this one (higher precedence wins).
    ///
    /// `subject` and `all-benchmarks` pick the same setting, so a layer that
    /// names only a subject also clears a lower layer's `all-benchmarks`.
    pub fn merge_from(&mut self, other: &Self) {
        if other.values.contains_key(KEY_SUBJECT) && !other.values.contains_key(KEY_ALL_BENCHMARKS) {
            self.values.remove(KEY_ALL_BENCHMARKS);
        }
        for (key, value) in &other.values {
            self.values.insert(key.clone(), value.clone());
        }
    }

    /// Merge multiple layers in precedence order (lowest to highest).
    #[must_use]
    pub fn merge_layers(layers: &[Self]) -> Self {
        let mut merged = Self::default();
        for layer in layers {
            merged.merge_from(layer);
        }
        merged
    }

    /// Build a layer from a YAML file path. Missing files return empty config.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn from_yaml(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        let value: serde_yaml::Value = serde_yaml::from_str(&contents)?;
        Ok(layer_from_yaml_value(&value))
    }

    /// Build a layer from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_vars(env::vars())
    }

    /// Build a layer from `(name, value)` pairs; only `BENCH_COMPARE_*`
    /// names are used.
    #[must_use]
    pub fn from_env_vars<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut layer = Self::default();
        for (key, value) in vars {
            if let Some(stripped) = key.strip_prefix(ENV_PREFIX) {
                insert_key_value(&mut layer, stripped, value);
            }
        }
        layer
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }
}

/// CLI overrides for config loading (optional).
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub threshold: Option<f64>,
    pub criterion_dir: Option<PathBuf>,
    pub subject: Option<String>,
    pub all_benchmarks: Option<bool>,
    pub json_output: Option<PathBuf>,
    pub markdown_output: Option<PathBuf>,
}

impl CliOverrides {
    #[must_use]
    pub fn as_layer(&self) -> ConfigLayer {
        let mut layer = ConfigLayer::default();

        if let Some(threshold) = self.threshold {
            insert_key_value(&mut layer, KEY_THRESHOLD, threshold.to_string());
        }
        if let Some(dir) = &self.criterion_dir {
            insert_key_value(&mut layer, KEY_CRITERION_DIR, dir.to_string_lossy().to_string());
        }
        if let Some(subject) = &self.subject {
            insert_key_value(&mut layer, KEY_SUBJECT, subject.clone());
        }
        if let Some(all) = self.all_benchmarks {
            insert_key_value(&mut layer, KEY_ALL_BENCHMARKS, all.to_string());
        }
        if let Some(path) = &self.json_output {
            insert_key_value(&mut layer, KEY_JSON_OUTPUT, path.to_string_lossy().to_string());
        }
        if let Some(path) = &self.markdown_output {
            insert_key_value(&mut layer, KEY_MARKDOWN_OUTPUT, path.to_string_lossy().to_string());
        }

        layer
    }
}

/// Fully resolved settings for one comparison run.
#[derive(Debug, Clone, PartialEq)]
pub struct CompareConfig {
    pub threshold: f64,
    pub criterion_dir: PathBuf,
    pub subject: SubjectFilter,
    pub artifacts: ArtifactPaths,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            criterion_dir: PathBuf::from(DEFAULT_CRITERION_DIR),
            subject: SubjectFilter::default(),
            artifacts: ArtifactPaths::default(),
        }
    }
}

impl CompareConfig {
    /// Resolve settings from a merged layer; unset keys take defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a value cannot be parsed or the subject marker is
    /// empty. Any parseable threshold is used as given.
    pub fn from_layer(layer: &ConfigLayer) -> Result<Self> {
        let mut config = Self::default();

        if let Some(raw) = layer.get(KEY_THRESHOLD) {
            config.threshold = raw
                .parse()
                .map_err(|_| CompareError::Config(format!("invalid threshold '{raw}'")))?;
        }

        if let Some(dir) = layer.get(KEY_CRITERION_DIR) {
            config.criterion_dir = PathBuf::from(dir);
        }

        let all_benchmarks = match layer.get(KEY_ALL_BENCHMARKS) {
            Some(raw) => parse_bool(raw).ok_or_else(|| {
                CompareError::Config(format!("invalid boolean for {KEY_ALL_BENCHMARKS}: '{raw}'"))
            })?,
            None => false,
        };

        if all_benchmarks {
            config.subject = SubjectFilter::All;
        } else if let Some(raw) = layer.values.get(KEY_SUBJECT) {
            if raw.trim().is_empty() {
                return Err(CompareError::Config(
                    "subject marker must not be empty; use all-benchmarks to compare everything"
                        .to_string(),
                ));
            }
            config.subject = SubjectFilter::Marker(raw.trim().to_string());
        }

        if let Some(path) = layer.get(KEY_JSON_OUTPUT) {
            config.artifacts.json = PathBuf::from(path);
        }
        if let Some(path) = layer.get(KEY_MARKDOWN_OUTPUT) {
            config.artifacts.markdown = PathBuf::from(path);
        }

        Ok(config)
    }
}

/// Load the config file layer.
///
/// An explicit `path` must exist; the default file is optional.
///
/// # Errors
///
/// Returns an error if an explicit file is missing, or a file cannot be
/// read or parsed.
pub fn load_file_config(path: Option<&Path>) -> Result<ConfigLayer> {
    match path {
        Some(path) if !path.exists() => Err(CompareError::Config(format!(
            "config file not found: {}",
            path.display()
        ))),
        Some(path) => ConfigLayer::from_yaml(path),
        None => ConfigLayer::from_yaml(Path::new(DEFAULT_CONFIG_FILE)),
    }
}

/// Load and resolve configuration with full precedence.
///
/// # Errors
///
/// Returns an error if the config file or any value is invalid.
pub fn load_config(config_path: Option<&Path>, cli: &CliOverrides) -> Result<CompareConfig> {
    let file_layer = load_file_config(config_path)?;
    let env_layer = ConfigLayer::from_env();
    let cli_layer = cli.as_layer();

    let merged = ConfigLayer::merge_layers(&[file_layer, env_layer, cli_layer]);
    CompareConfig::from_layer(&merged)
}

fn insert_key_value(layer: &mut ConfigLayer, key: &str, value: String) {
    layer.values.insert(canonical_key(key), value);
}

/// Lowercase, `_` to `-`, and resolve nested aliases.
fn canonical_key(key: &str) -> String {
    let normalized = key.trim().to_lowercase().replace('_', "-");
    KEY_ALIASES
        .iter()
        .find(|(alias, _)| *alias == normalized)
        .map_or(normalized, |(_, canonical)| (*canonical).to_string())
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Some(true),
        "0" | "false" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}

fn layer_from_yaml_value(value: &serde_yaml::Value) -> ConfigLayer {
    let mut layer = ConfigLayer::default();
    let mut flat = HashMap::new();
    flatten_yaml(value, "", &mut flat);

    for (key, value) in flat {
        insert_key_value(&mut layer, &key, value);
    }

    layer
}

fn flatten_yaml(value: &serde_yaml::Value, prefix: &str, out: &mut HashMap<String, String>) {
    match value {
        serde_yaml::Value::Mapping(map) => {
            for (key, value) in map {
                let Some(key_str) = key.as_str() else {
                    continue;
                };
                let next_prefix = if prefix.is_empty() {
                    key_str.to_string()
                } else {
                    format!("{prefix}.{key_str}")
                };
                flatten_yaml(value, &next_prefix, out);
            }
        }
        _ => {
            if let Some(value) = yaml_scalar_to_string(value) {
                out.insert(prefix.to_string(), value);
            }
        }
    }
}

fn yaml_scalar_to_string(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::Bool(v) => Some(v.to_string()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Null
        | serde_yaml::Value::Sequence(_)
        | serde_yaml::Value::Mapping(_) => None,
        serde_yaml::Value::Tagged(tagged) => yaml_scalar_to_string(&tagged.value),
    }
}
