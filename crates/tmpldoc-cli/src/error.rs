//! CLI error types with exit code handling
//!
//! Every command returns [`CliError`], which keeps the diagnostic of the
//! library error it wraps and maps it to an exit code.

use miette::Diagnostic;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tmpldoc_core::CoreError;
use tmpldoc_engine::{EngineError, TemplateError};
use tmpldoc_extract::ExtractError;

use crate::exit_codes;

#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    /// Invalid configuration file
    #[error("Configuration error: {message}")]
    #[diagnostic(code(tmpldoc::cli::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// A descriptor could not be documented
    #[error(transparent)]
    #[diagnostic(transparent)]
    Extract(#[from] ExtractError),

    /// Page or README template failed
    #[error(transparent)]
    #[diagnostic(transparent)]
    Template(TemplateError),

    /// Unreadable template override
    #[error("{message}")]
    #[diagnostic(code(tmpldoc::cli::template_file))]
    TemplateFile { message: String },

    #[error("Failed to write {}: {source}", .path.display())]
    #[diagnostic(code(tmpldoc::cli::io))]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {message}")]
    #[diagnostic(code(tmpldoc::cli::io))]
    Io { message: String },

    /// Internal error (unexpected failure)
    #[error("Internal error: {message}")]
    #[diagnostic(code(tmpldoc::cli::internal))]
    Internal { message: String },
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Config { .. } | CliError::TemplateFile { .. } => exit_codes::CONFIG_ERROR,
            CliError::Extract(ExtractError::Io(_) | ExtractError::DirectoryNotFound(_)) => {
                exit_codes::IO_ERROR
            }
            CliError::Extract(_) => exit_codes::EXTRACT_ERROR,
            CliError::Template(_) => exit_codes::TEMPLATE_ERROR,
            CliError::Write { .. } | CliError::Io { .. } => exit_codes::IO_ERROR,
            CliError::Internal { .. } => exit_codes::ERROR,
        }
    }

    /// Create a configuration error for a file
    pub fn config(path: &Path, err: CoreError) -> Self {
        Self::Config {
            message: format!("{}: {}", path.display(), err),
            help: Some("see the `tmpldoc catalog` command for the effective tables".to_string()),
        }
    }

    /// Create an error for a file that could not be written
    pub fn write(path: &Path, source: std::io::Error) -> Self {
        Self::Write {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl From<EngineError> for CliError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Template(e) => CliError::Template(e),
            EngineError::Io(e) => CliError::from(e),
            other => CliError::TemplateFile {
                message: other.to_string(),
            },
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io {
            message: err.to_string(),
        }
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let missing = CliError::from(ExtractError::DirectoryNotFound(PathBuf::from("nowhere")));
        assert_eq!(missing.exit_code(), exit_codes::IO_ERROR);

        let identity = CliError::from(ExtractError::MissingIdentity {
            path: PathBuf::from("eap/a.json"),
        });
        assert_eq!(identity.exit_code(), exit_codes::EXTRACT_ERROR);

        let config = CliError::config(
            Path::new("tmpldoc.yaml"),
            CoreError::InvalidConfig {
                message: "outputDir must not be empty".to_string(),
            },
        );
        assert_eq!(config.exit_code(), exit_codes::CONFIG_ERROR);
        assert!(config.to_string().contains("tmpldoc.yaml"));
    }

    #[test]
    fn test_engine_error_mapping() {
        let err = CliError::from(EngineError::TemplateFile {
            path: PathBuf::from("page.adoc.j2"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        });
        assert_eq!(err.exit_code(), exit_codes::CONFIG_ERROR);
        assert!(err.to_string().contains("page.adoc.j2"));
    }
}
