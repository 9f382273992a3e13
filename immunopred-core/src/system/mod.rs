pub mod paths;

// Re-export commonly used functions
pub use paths::{
    default_config_path, describe_paths, immunopred_home, immunopred_tools_dir,
    immunopred_workspace_dir, is_custom_home,
};
