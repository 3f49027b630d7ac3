//! Error and issue types for the extraction engine
//!
//! `ExtractError` aborts the extraction of one descriptor. `BatchIssue`
//! records that abort (or a skipped descriptor) so a batch can report it
//! and move on to the next file.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;
use tmpldoc_core::CoreError;

/// Extraction error
#[derive(Debug, Error, Diagnostic)]
pub enum ExtractError {
    #[error("no template label for template {path}, can't generate documentation")]
    #[diagnostic(
        code(tmpldoc::extract::missing_identity),
        help("add a `template` entry to the descriptor's `labels`")
    )]
    MissingIdentity { path: PathBuf },

    #[error("{kind} '{object}' has no {field}")]
    #[diagnostic(code(tmpldoc::extract::missing_field))]
    MissingField {
        kind: &'static str,
        object: String,
        field: &'static str,
    },

    #[error("BuildConfig '{object}' builds from '{image}', which has no registered documentation link")]
    #[diagnostic(code(tmpldoc::extract::unregistered_image))]
    UnregisteredImage {
        object: String,
        image: String,
        #[help]
        help: Option<String>,
    },

    #[error(transparent)]
    #[diagnostic(code(tmpldoc::extract::descriptor))]
    Descriptor(#[from] CoreError),

    #[error("IO error: {0}")]
    #[diagnostic(code(tmpldoc::extract::io))]
    Io(#[from] std::io::Error),

    #[error("Directory not found: {0}")]
    #[diagnostic(code(tmpldoc::extract::io))]
    DirectoryNotFound(PathBuf),
}

impl ExtractError {
    /// A required field is absent from an object
    pub fn missing(kind: &'static str, object: impl Into<String>, field: &'static str) -> Self {
        Self::MissingField {
            kind,
            object: object.into(),
            field,
        }
    }

    /// Help text, when the error carries one
    pub fn help_text(&self) -> Option<String> {
        self.help().map(|h| h.to_string())
    }
}

/// Result type for extraction operations
pub type Result<T> = std::result::Result<T, ExtractError>;

// =============================================================================
// BATCH ISSUES
// =============================================================================

/// What happened to a descriptor that produced no document
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IssueSeverity {
    /// The descriptor cannot be documented (no identity)
    Skipped,
    /// Extraction or rendering aborted for this descriptor
    Failed,
}

impl IssueSeverity {
    /// Get the label for this severity
    pub fn label(&self) -> &'static str {
        match self {
            Self::Skipped => "skipped",
            Self::Failed => "failed",
        }
    }

    /// Get the icon for this severity
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Skipped => "○",
            Self::Failed => "✗",
        }
    }
}

/// A per-descriptor problem recorded during a batch
#[derive(Debug, Clone)]
pub struct BatchIssue {
    pub severity: IssueSeverity,
    /// Descriptor file
    pub file: PathBuf,
    /// Human-readable message
    pub message: String,
    /// Suggested fix
    pub help: Option<String>,
}

impl BatchIssue {
    /// Record an extraction error against a descriptor file
    pub fn from_error(file: PathBuf, error: &ExtractError) -> Self {
        let severity = match error {
            ExtractError::MissingIdentity { .. } => IssueSeverity::Skipped,
            _ => IssueSeverity::Failed,
        };

        Self {
            severity,
            file,
            message: error.to_string(),
            help: error.help_text(),
        }
    }

    /// Record a failure that happened outside the extraction engine (rendering, writing)
    pub fn failed(file: PathBuf, message: impl Into<String>) -> Self {
        Self {
            severity: IssueSeverity::Failed,
            file,
            message: message.into(),
            help: None,
        }
    }
}

impl std::fmt::Display for BatchIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {} - {}",
            self.severity.label(),
            self.file.display(),
            self.message
        )?;

        if let Some(ref help) = self.help {
            write!(f, "\n  → {}", help)?;
        }

        Ok(())
    }
}
