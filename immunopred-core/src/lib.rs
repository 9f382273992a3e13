//! Core utilities and types shared across all immunopred crates

pub mod config;
pub mod error;
pub mod system;

// Re-export commonly used types
pub use config::{load_config, load_default_config, save_config, Config};
pub use error::{ImmunopredError, ImmunopredResult};

// Re-export system utilities
pub use system::{
    default_config_path, immunopred_home, immunopred_tools_dir, immunopred_workspace_dir,
};

/// Version information for the immunopred project
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");
