//! Test environment management
//!
//! Provides isolated test environments with automatic cleanup using RAII.

use anyhow::{Context, Result};
use immunopred_core::{save_config, Config};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

/// Roots of live environments
static ENV_REGISTRY: Lazy<Mutex<Vec<PathBuf>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Configuration for test environment
#[derive(Debug, Clone, Default)]
pub struct TestConfig {
    /// Keep the directory after the test (for debugging)
    pub preserve: bool,
    /// Set `IMMUNOPRED_LOG=debug` for the lifetime of the environment
    pub verbose: bool,
    /// Custom prefix for test directories
    pub prefix: Option<String>,
}

/// Isolated home, tools and workspace directories.
///
/// `IMMUNOPRED_HOME`, `IMMUNOPRED_TOOLS_DIR` and `IMMUNOPRED_WORKSPACE_DIR`
/// point into the environment until it is dropped. Tests that create one
/// should be marked `#[serial]`.
pub struct TestEnvironment {
    temp_dir: Option<TempDir>,
    root_path: PathBuf,
    saved_env: HashMap<String, Option<String>>,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        Self::with_config(TestConfig::default())
    }

    /// Fails if another environment in this process is still alive, since
    /// both would claim the same `IMMUNOPRED_*` variables.
    pub fn with_config(config: TestConfig) -> Result<Self> {
        if let Some(live) = active_environments().first() {
            anyhow::bail!(
                "Test environment at {} is still active; mark overlapping tests #[serial]",
                live.display()
            );
        }

        let prefix = config.prefix.as_deref().unwrap_or("immunopred-test");
        let temp_dir =
            TempDir::with_prefix(prefix).context("Failed to create temporary directory")?;
        let root_path = temp_dir.path().to_path_buf();

        std::fs::create_dir_all(root_path.join("tools"))?;
        std::fs::create_dir_all(root_path.join("workspace"))?;

        let mut env = Self {
            temp_dir: Some(temp_dir),
            root_path,
            saved_env: HashMap::new(),
        };
        env.setup_environment(&config);
        if config.preserve {
            env.preserve();
        }
        Ok(env)
    }

    fn setup_environment(&mut self, config: &TestConfig) {
        let mut vars = vec![
            ("IMMUNOPRED_HOME", self.root_path.to_string_lossy().to_string()),
            (
                "IMMUNOPRED_TOOLS_DIR",
                self.tools_dir().to_string_lossy().to_string(),
            ),
            (
                "IMMUNOPRED_WORKSPACE_DIR",
                self.workspace_dir().to_string_lossy().to_string(),
            ),
        ];
        if config.verbose {
            vars.push(("IMMUNOPRED_LOG", "debug".to_string()));
        }

        for (key, value) in vars {
            self.saved_env
                .insert(key.to_string(), std::env::var(key).ok());
            std::env::set_var(key, value);
        }

        if let Ok(mut registry) = ENV_REGISTRY.lock() {
            registry.push(self.root_path.clone());
        }
    }

    pub fn root(&self) -> &Path {
        &self.root_path
    }

    /// Directory searched for predictor binaries
    pub fn tools_dir(&self) -> PathBuf {
        self.root_path.join("tools")
    }

    /// Directory for scratch files
    pub fn workspace_dir(&self) -> PathBuf {
        self.root_path.join("workspace")
    }

    pub fn config_path(&self) -> PathBuf {
        self.root_path.join("config.toml")
    }

    /// Save `config` where `load_default_config` will find it
    pub fn write_config(&self, config: &Config) -> Result<PathBuf> {
        let path = self.config_path();
        save_config(&path, config)?;
        Ok(path)
    }

    /// Write a file relative to the environment root
    pub fn write_file(&self, path: impl AsRef<Path>, content: &[u8]) -> Result<PathBuf> {
        let full_path = self.root_path.join(path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&full_path, content)?;
        Ok(full_path)
    }

    /// Install an executable script into the tools directory
    pub fn install_tool(&self, name: &str, script: &str) -> Result<PathBuf> {
        let path = self.write_file(Path::new("tools").join(name), script.as_bytes())?;
        crate::mock::make_executable(&path)?;
        Ok(path)
    }

    /// Number of files left in the workspace directory
    pub fn workspace_entries(&self) -> Result<usize> {
        Ok(std::fs::read_dir(self.workspace_dir())?.count())
    }

    /// Keep the directory on disk after drop
    pub fn preserve(&mut self) {
        if let Some(temp_dir) = self.temp_dir.take() {
            let path = temp_dir.keep();
            eprintln!("Test environment preserved at: {}", path.display());
        }
    }
}

/// Roots of the environments currently alive in this process
pub fn active_environments() -> Vec<PathBuf> {
    ENV_REGISTRY
        .lock()
        .map(|registry| registry.clone())
        .unwrap_or_default()
}

impl Drop for TestEnvironment {
    fn drop(&mut self) {
        for (key, value) in &self.saved_env {
            match value {
                Some(v) => std::env::set_var(key, v),
                None => std::env::remove_var(key),
            }
        }

        if let Ok(mut registry) = ENV_REGISTRY.lock() {
            registry.retain(|root| root != &self.root_path);
        }
        // temp_dir is removed when dropped
    }
}
