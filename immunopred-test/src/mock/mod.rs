//! Stand-in predictor binaries

mod predictor;

pub use predictor::{MockPredictor, MockRun};

use anyhow::Result;
use std::path::Path;

/// Mark a script as executable (no-op off unix)
pub fn make_executable(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = std::fs::metadata(path)?.permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(path, perms)?;
    }
    #[cfg(not(unix))]
    let _ = path;
    Ok(())
}
