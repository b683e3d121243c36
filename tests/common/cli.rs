use assert_cmd::Command;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tempfile::TempDir;

#[derive(Debug)]
pub struct BcRun {
    pub stdout: String,
    pub stderr: String,
    pub status: std::process::ExitStatus,
    pub duration: Duration,
    pub log_path: PathBuf,
}

impl BcRun {
    pub fn exit_code(&self) -> Option<i32> {
        self.status.code()
    }
}

/// Scratch working directory holding a Criterion result tree.
pub struct BcWorkspace {
    pub temp_dir: TempDir,
    pub root: PathBuf,
    pub log_dir: PathBuf,
}

impl BcWorkspace {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("temp dir");
        let root = temp_dir.path().to_path_buf();
        let log_dir = root.join("logs");
        fs::create_dir_all(&log_dir).expect("log dir");
        Self {
            temp_dir,
            root,
            log_dir,
        }
    }

    pub fn criterion_dir(&self) -> PathBuf {
        self.root.join("target").join("criterion")
    }

    /// Write `<criterion>/<rel>/estimates.json` with the given mean.
    pub fn write_estimate(&self, rel: &str, mean_ns: f64) {
        let body = serde_json::json!({
            "mean": {
                "confidence_interval": {
                    "confidence_level": 0.95,
                    "lower_bound": mean_ns,
                    "upper_bound": mean_ns
                },
                "point_estimate": mean_ns,
                "standard_error": 0.0
            },
            "median": { "point_estimate": mean_ns }
        });
        self.write_raw(rel, &body.to_string());
    }

    /// Write arbitrary contents as `<criterion>/<rel>/estimates.json`.
    pub fn write_raw(&self, rel: &str, contents: &str) {
        let dir = self.criterion_dir().join(rel);
        fs::create_dir_all(&dir).expect("estimate dir");
        fs::write(dir.join("estimates.json"), contents).expect("write estimate");
    }

    pub fn read(&self, rel: impl AsRef<Path>) -> String {
        fs::read_to_string(self.root.join(rel)).expect("read output")
    }

    pub fn exists(&self, rel: impl AsRef<Path>) -> bool {
        self.root.join(rel).exists()
    }
}

pub fn run_bench_compare<I, S>(workspace: &BcWorkspace, args: I, label: &str) -> BcRun
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    run_bench_compare_with_env(
        workspace,
        args,
        std::iter::empty::<(String, String)>(),
        label,
    )
}

pub fn run_bench_compare_with_env<I, S, E, K, V>(
    workspace: &BcWorkspace,
    args: I,
    env_vars: E,
    label: &str,
) -> BcRun
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
    E: IntoIterator<Item = (K, V)>,
    K: AsRef<OsStr>,
    V: AsRef<OsStr>,
{
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("bench-compare"));
    cmd.current_dir(&workspace.root);
    for (key, _) in std::env::vars() {
        if key.starts_with("BENCH_COMPARE_") {
            cmd.env_remove(key);
        }
    }
    cmd.args(args);
    cmd.envs(env_vars);
    cmd.env("NO_COLOR", "1");
    cmd.env("RUST_LOG", "bench_compare=debug");
    cmd.env("RUST_BACKTRACE", "1");

    let start = Instant::now();
    let output = cmd.output().expect("run bench-compare");
    let duration = start.elapsed();

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    let log_path = workspace.log_dir.join(format!("{label}.log"));
    let log_body = format!(
        "label: {label}\nduration: {:?}\nstatus: {}\nargs: {:?}\ncwd: {}\n\nstdout:\n{}\n\nstderr:\n{}\n",
        duration,
        output.status,
        cmd.get_args().collect::<Vec<_>>(),
        workspace.root.display(),
        stdout,
        stderr
    );
    fs::write(&log_path, log_body).expect("write log");

    BcRun {
        stdout,
        stderr,
        status: output.status,
        duration,
        log_path,
    }
}

/// Pull the JSON object out of stderr, skipping log lines before it.
pub fn extract_json_payload(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();
    for (idx, line) in lines.iter().enumerate() {
        if line.trim_start().starts_with('{') {
            return lines[idx..].join("\n").trim().to_string();
        }
    }
    text.trim().to_string()
}
