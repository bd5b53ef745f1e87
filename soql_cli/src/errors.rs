use std::fmt;

/// Failures surfaced by CLI commands. Details are reported through `ui`
/// before the error is returned.
#[derive(Debug, Clone, PartialEq)]
pub enum CliError {
    InputError,
    FileError,
    SessionError,
    BuildError,
    ValidationError,
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::InputError => write!(f, "Invalid input"),
            CliError::FileError => write!(f, "File access failed"),
            CliError::SessionError => write!(f, "Invalid session"),
            CliError::BuildError => write!(f, "Failed to build query"),
            CliError::ValidationError => write!(f, "Validation failed"),
        }
    }
}

impl std::error::Error for CliError {}
