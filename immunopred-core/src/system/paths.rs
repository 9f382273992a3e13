use std::path::PathBuf;

/// Get the immunopred home directory
/// Checks IMMUNOPRED_HOME environment variable, falls back to ${HOME}/.immunopred
pub fn immunopred_home() -> PathBuf {
    if let Ok(path) = std::env::var("IMMUNOPRED_HOME") {
        return PathBuf::from(path);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".immunopred")
}

/// Get the tools directory
/// Checks IMMUNOPRED_TOOLS_DIR environment variable, falls back to IMMUNOPRED_HOME/tools
pub fn immunopred_tools_dir() -> PathBuf {
    if let Ok(path) = std::env::var("IMMUNOPRED_TOOLS_DIR") {
        PathBuf::from(path)
    } else {
        immunopred_home().join("tools")
    }
}

/// Get the workspace directory for scratch files
/// Checks IMMUNOPRED_WORKSPACE_DIR, falls back to the system temp dir
pub fn immunopred_workspace_dir() -> PathBuf {
    if let Ok(path) = std::env::var("IMMUNOPRED_WORKSPACE_DIR") {
        PathBuf::from(path)
    } else {
        std::env::temp_dir().join("immunopred")
    }
}

/// Location of the user config file
pub fn default_config_path() -> PathBuf {
    immunopred_home().join("config.toml")
}

/// Check if running with a custom home directory
pub fn is_custom_home() -> bool {
    std::env::var("IMMUNOPRED_HOME").is_ok()
}

/// Get a human-readable description of the current path configuration
pub fn describe_paths() -> String {
    format!(
        "immunopred paths:\n  \
        Home: {}\n  \
        Tools: {}\n  \
        Workspace: {}\n  \
        Config: {}\n  \
        Custom: {}",
        immunopred_home().display(),
        immunopred_tools_dir().display(),
        immunopred_workspace_dir().display(),
        default_config_path().display(),
        if is_custom_home() {
            "Yes"
        } else {
            "No (using defaults)"
        }
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_home_override() {
        std::env::set_var("IMMUNOPRED_HOME", "/custom/immunopred");
        std::env::remove_var("IMMUNOPRED_TOOLS_DIR");

        assert_eq!(immunopred_home(), PathBuf::from("/custom/immunopred"));
        assert_eq!(
            immunopred_tools_dir(),
            PathBuf::from("/custom/immunopred/tools")
        );
        assert_eq!(
            default_config_path(),
            PathBuf::from("/custom/immunopred/config.toml")
        );
        assert!(is_custom_home());

        std::env::remove_var("IMMUNOPRED_HOME");
    }

    #[test]
    #[serial]
    fn test_tools_dir_override() {
        std::env::set_var("IMMUNOPRED_TOOLS_DIR", "/opt/predictors");
        assert_eq!(immunopred_tools_dir(), PathBuf::from("/opt/predictors"));
        std::env::remove_var("IMMUNOPRED_TOOLS_DIR");
    }

    #[test]
    #[serial]
    fn test_workspace_defaults_under_temp() {
        std::env::remove_var("IMMUNOPRED_WORKSPACE_DIR");
        let dir = immunopred_workspace_dir();
        assert!(dir.starts_with(std::env::temp_dir()));
        assert!(dir.ends_with("immunopred"));
    }

    #[test]
    #[serial]
    fn test_describe_paths() {
        let description = describe_paths();

        assert!(description.contains("Home:"));
        assert!(description.contains("Tools:"));
        assert!(description.contains("Workspace:"));
        assert!(description.contains("Config:"));
        assert!(description.contains("Yes") || description.contains("No (using defaults)"));
    }
}
