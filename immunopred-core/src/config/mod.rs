//! Configuration types for immunopred

use crate::ImmunopredError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Hard ceiling on alleles per external invocation
pub const MAX_ALLELES_PER_BATCH: usize = 50;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub prediction: PredictionConfig,
    #[serde(default)]
    pub workspace: WorkspaceConfig,
    /// Method identifier (e.g. `netmhc-3.4`) to executable path
    #[serde(default)]
    pub executables: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionConfig {
    #[serde(default = "default_max_alleles_per_batch")]
    pub max_alleles_per_batch: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WorkspaceConfig {
    /// Directory for scratch peptide/output files
    #[serde(default)]
    pub temp_dir: Option<PathBuf>,
    /// Directory searched for predictor binaries before PATH
    #[serde(default)]
    pub tools_dir: Option<PathBuf>,
}

fn default_max_alleles_per_batch() -> usize { MAX_ALLELES_PER_BATCH }

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            max_alleles_per_batch: default_max_alleles_per_batch(),
        }
    }
}

impl Config {
    /// Check values that serde cannot constrain
    pub fn validate(&self) -> Result<(), ImmunopredError> {
        let size = self.prediction.max_alleles_per_batch;
        if size == 0 || size > MAX_ALLELES_PER_BATCH {
            return Err(ImmunopredError::Configuration(format!(
                "max_alleles_per_batch must be within 1..={}, got {}",
                MAX_ALLELES_PER_BATCH, size
            )));
        }
        Ok(())
    }

    /// Configured executable for a method identifier, if any
    pub fn executable_for(&self, method_id: &str) -> Option<&str> {
        self.executables.get(method_id).map(String::as_str)
    }

    /// Scratch directory, falling back to the workspace directory
    pub fn temp_dir(&self) -> PathBuf {
        self.workspace
            .temp_dir
            .clone()
            .unwrap_or_else(crate::system::immunopred_workspace_dir)
    }

    /// Tools directory, falling back to `IMMUNOPRED_TOOLS_DIR`/home
    pub fn tools_dir(&self) -> PathBuf {
        self.workspace
            .tools_dir
            .clone()
            .unwrap_or_else(crate::system::immunopred_tools_dir)
    }
}

pub fn default_config() -> Config {
    Config::default()
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ImmunopredError> {
    let contents = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)
        .map_err(|e| ImmunopredError::Configuration(format!("Failed to parse config: {}", e)))?;
    config.validate()?;
    Ok(config)
}

/// Load the config at the default location, or defaults when it is absent
pub fn load_default_config() -> Result<Config, ImmunopredError> {
    let path = crate::system::default_config_path();
    if path.exists() {
        tracing::debug!("Loading config from {}", path.display());
        load_config(path)
    } else {
        Ok(Config::default())
    }
}

pub fn save_config<P: AsRef<Path>>(path: P, config: &Config) -> Result<(), ImmunopredError> {
    let contents = toml::to_string_pretty(config)
        .map_err(|e| ImmunopredError::Configuration(format!("Failed to serialize config: {}", e)))?;
    std::fs::write(path, contents)?;
    Ok(())
}
