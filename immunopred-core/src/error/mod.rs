//! Core error types for immunopred

use thiserror::Error;

/// Main error type for prediction operations
#[derive(Error, Debug)]
pub enum ImmunopredError {
    #[error("{method} {version} could not be found in PATH (looked for '{executable}')")]
    ExecutableNotFound {
        method: String,
        version: String,
        executable: String,
    },

    #[error("Internal version {internal} does not match external version {external}")]
    VersionMismatch { internal: String, external: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unsuccessful execution of {command} (exit status {}) with error: {stderr}", describe_status(.status))]
    SubprocessExecution {
        command: String,
        status: Option<i32>,
        stderr: String,
    },

    #[error(
        "No predictions could be made with {method} for given input. \
         Check your epitope length and HLA allele combination."
    )]
    EmptyResult { method: String },

    #[error("Parsing error: {0}")]
    Parse(String),

    #[error("Unknown prediction method: {0}")]
    UnknownMethod(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn describe_status(status: &Option<i32>) -> String {
    match status {
        Some(code) => code.to_string(),
        None => "terminated by signal".to_string(),
    }
}

impl ImmunopredError {
    /// Whether the error was raised before any external process was spawned
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ImmunopredError::InvalidInput(_)
                | ImmunopredError::UnknownMethod(_)
                | ImmunopredError::Configuration(_)
        )
    }
}

/// Result type alias for prediction operations
pub type ImmunopredResult<T> = Result<T, ImmunopredError>;

impl From<anyhow::Error> for ImmunopredError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<ImmunopredError>() {
            Ok(inner) => inner,
            Err(err) => ImmunopredError::Parse(err.to_string()),
        }
    }
}
