//! Locating predictor binaries on disk

use std::path::{Path, PathBuf};

/// Resolves an executable name against the tools directory, then `PATH`
#[derive(Debug, Clone)]
pub struct ToolLocator {
    tools_dir: PathBuf,
}

impl Default for ToolLocator {
    fn default() -> Self {
        Self::new(immunopred_core::immunopred_tools_dir())
    }
}

impl ToolLocator {
    pub fn new(tools_dir: impl Into<PathBuf>) -> Self {
        Self {
            tools_dir: tools_dir.into(),
        }
    }

    pub fn tools_dir(&self) -> &Path {
        &self.tools_dir
    }

    /// Full path of `executable`, if it can be found
    pub fn locate(&self, executable: &str) -> Option<PathBuf> {
        if executable.is_empty() {
            return None;
        }

        // Explicit paths are taken as-is
        if executable.contains(std::path::MAIN_SEPARATOR) {
            let path = PathBuf::from(executable);
            return path.is_file().then_some(path);
        }

        let local = self.tools_dir.join(executable);
        if local.is_file() {
            tracing::debug!("Found {} in tools directory", executable);
            return Some(local);
        }

        which::which(executable).ok()
    }

    pub fn is_available(&self, executable: &str) -> bool {
        self.locate(executable).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_tools_dir_takes_precedence() {
        let dir = TempDir::new().unwrap();
        let binary = dir.path().join("netMHC-unit-test");
        std::fs::write(&binary, "#!/bin/sh\n").unwrap();

        let locator = ToolLocator::new(dir.path());
        assert_eq!(locator.locate("netMHC-unit-test"), Some(binary));
    }

    #[test]
    fn test_falls_back_to_path() {
        let dir = TempDir::new().unwrap();
        let locator = ToolLocator::new(dir.path());

        assert!(locator.is_available("sh"));
        assert!(!locator.is_available("definitely-not-a-predictor-binary"));
        assert!(!locator.is_available(""));
    }

    #[test]
    fn test_explicit_path() {
        let dir = TempDir::new().unwrap();
        let binary = dir.path().join("PickPocket");
        std::fs::write(&binary, "").unwrap();

        let locator = ToolLocator::new("/nonexistent");
        let explicit = binary.to_string_lossy().to_string();
        assert_eq!(locator.locate(&explicit), Some(binary));
        assert_eq!(locator.locate("/nonexistent/PickPocket"), None);
    }
}
