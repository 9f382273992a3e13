use super::make_executable;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Output flags whose next argument is the file a tool writes to
const OUTPUT_FLAGS: &str = "-o|-x|-xlsfile";

/// What a mock binary does when invoked
#[derive(Debug, Clone, Default)]
pub struct MockRun {
    pub output: String,
    pub exit_code: i32,
    pub stderr: String,
    /// Printed in reply to `-version`
    pub version: Option<String>,
}

impl MockRun {
    /// Succeed, producing `content` on stdout and in the output file
    pub fn emit(content: impl Into<String>) -> Self {
        Self {
            output: content.into(),
            ..Default::default()
        }
    }

    /// Exit with `code`, writing `stderr` to standard error
    pub fn fail(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            exit_code: code,
            stderr: stderr.into(),
            ..Default::default()
        }
    }

    /// Produce `content` on stdout, then exit with `code`
    pub fn crash_after(content: impl Into<String>, code: i32, stderr: impl Into<String>) -> Self {
        Self {
            output: content.into(),
            exit_code: code,
            stderr: stderr.into(),
            ..Default::default()
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }
}

/// A directory of shell scripts posing as predictor executables.
///
/// Every scripted invocation appends its arguments to `invocations.log` so
/// tests can count and inspect calls. `-version` queries go to `versions.log`.
pub struct MockPredictor {
    dir: TempDir,
}

impl MockPredictor {
    pub fn new() -> Result<Self> {
        let dir = TempDir::with_prefix("immunopred-mock").context("Failed to create mock directory")?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    fn log_path(&self) -> PathBuf {
        self.dir.path().join("invocations.log")
    }

    fn version_log_path(&self) -> PathBuf {
        self.dir.path().join("versions.log")
    }

    /// Write a `mockpred` script and return its path
    pub fn write_script(&self, run: &MockRun) -> Result<PathBuf> {
        self.write_named_script("mockpred", run)
    }

    pub fn write_named_script(&self, name: &str, run: &MockRun) -> Result<PathBuf> {
        let script = self.script(name, run)?;
        let path = self.dir.path().join(name);
        std::fs::write(&path, script)
            .with_context(|| format!("Failed to write mock script {}", path.display()))?;
        make_executable(&path)?;
        Ok(path)
    }

    /// Script text for `name`; its canned output is stored next to the log,
    /// so the script may be installed anywhere
    pub fn script(&self, name: &str, run: &MockRun) -> Result<String> {
        let payload = self.dir.path().join(format!("{}.payload", name));
        std::fs::write(&payload, &run.output)?;

        let mut script = String::from("#!/bin/sh\n");
        script.push_str("if [ \"$1\" = \"-version\" ]; then\n");
        script.push_str(&format!("  echo \"$*\" >> '{}'\n", self.version_log_path().display()));
        if let Some(version) = &run.version {
            script.push_str(&format!("  echo 'version {}'\n", version));
        }
        script.push_str("  exit 0\nfi\n");
        script.push_str(&format!("echo \"$*\" >> '{}'\n", self.log_path().display()));

        if run.exit_code != 0 {
            if !run.output.is_empty() {
                script.push_str(&format!("cat '{}'\n", payload.display()));
            }
            script.push_str(&format!("echo '{}' >&2\n", run.stderr));
            script.push_str(&format!("exit {}\n", run.exit_code));
            return Ok(script);
        }

        script.push_str("out=\"\"\nprev=\"\"\nfor arg in \"$@\"; do\n");
        script.push_str(&format!(
            "  case \"$prev\" in\n    {}) out=\"$arg\" ;;\n  esac\n",
            OUTPUT_FLAGS
        ));
        script.push_str("  prev=\"$arg\"\ndone\n");
        script.push_str(&format!("cat '{}'\n", payload.display()));
        script.push_str(&format!(
            "if [ -n \"$out\" ]; then\n  cp '{}' \"$out\"\nfi\n",
            payload.display()
        ));
        Ok(script)
    }

    /// Number of scripted runs so far
    pub fn invocations(&self) -> Result<usize> {
        Ok(self.recorded_args()?.len())
    }

    /// Number of `-version` queries so far
    pub fn version_queries(&self) -> Result<usize> {
        Ok(read_log(&self.version_log_path())?.len())
    }

    /// Argument line of each run, oldest first
    pub fn recorded_args(&self) -> Result<Vec<String>> {
        read_log(&self.log_path())
    }
}

fn read_log(path: &Path) -> Result<Vec<String>> {
    match std::fs::read_to_string(path) {
        Ok(log) => Ok(log.lines().map(str::to_string).collect()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e.into()),
    }
}
