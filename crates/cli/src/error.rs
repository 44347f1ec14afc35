//! Error types for CLI operations.

use thiserror::Error;

/// CLI-specific error types
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// Configuration parsing error
    #[error("Failed to parse configuration: {message}")]
    ConfigParse { message: String },

    /// Archive access error
    #[error("Failed to open recording archive at {root}: {message}")]
    ArchiveOpen { root: String, message: String },

    /// Pipeline execution error
    #[error("Pipeline execution failed: {message}")]
    PipelineExecution { message: String },
}

impl CliError {
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
        }
    }

    pub fn archive_open(root: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ArchiveOpen {
            root: root.into(),
            message: message.into(),
        }
    }

    pub fn pipeline_execution(message: impl Into<String>) -> Self {
        Self::PipelineExecution {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CliError::config_not_found("missing.toml");
        assert_eq!(
            err.to_string(),
            "Configuration file not found: missing.toml"
        );

        let err = CliError::archive_open("./data", "permission denied");
        assert_eq!(
            err.to_string(),
            "Failed to open recording archive at ./data: permission denied"
        );
    }

    #[test]
    fn test_converts_to_anyhow() {
        let err: anyhow::Error = CliError::pipeline_execution("dispatcher closed").into();
        assert!(err.to_string().contains("dispatcher closed"));
    }
}
