//! Test utilities for the immunopred workspace
//!
//! This crate provides common test helpers for the immunopred workspace:
//!
//! - **Test Environment**: isolated home/tools/workspace directories with automatic cleanup
//! - **Fixtures**: sample output files for every supported predictor
//! - **Mock Predictors**: shell scripts that stand in for external binaries and count their invocations

pub mod environment;
pub mod fixtures;
pub mod mock;

// Re-export commonly used items
pub use environment::{TestConfig, TestEnvironment};
pub use mock::{MockPredictor, MockRun};

// Re-export test dependencies for convenience
pub use anyhow::{Context, Result};
pub use tempfile;

/// Initialize test logging (safe to call from every test)
pub fn init_test_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("IMMUNOPRED_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// Run a test with a clean environment
///
/// # Example
/// ```rust
/// use immunopred_test::with_test_env;
///
/// with_test_env(|env| {
///     assert!(env.tools_dir().exists());
///     Ok(())
/// })
/// .unwrap();
/// ```
pub fn with_test_env<F, R>(f: F) -> Result<R>
where
    F: FnOnce(&TestEnvironment) -> Result<R>,
{
    let env = TestEnvironment::new()?;
    f(&env)
}
