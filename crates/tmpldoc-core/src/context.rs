//! Where a descriptor comes from

use serde::Serialize;
use std::path::{Path, PathBuf};

/// Source of a descriptor: its product family directory and file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceContext {
    /// Name of the directory holding the descriptor (`eap`, `amq`, `secrets`, ...)
    pub family: String,

    /// Descriptor file
    pub path: PathBuf,
}

impl SourceContext {
    pub fn new(family: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            family: family.into(),
            path: path.into(),
        }
    }

    /// Context for a descriptor file, the family being its parent directory name
    pub fn for_file<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        let family = path
            .parent()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        Self::new(family, path)
    }

    /// Override the family (for descriptors outside a family directory)
    pub fn with_family(mut self, family: impl Into<String>) -> Self {
        self.family = family.into();
        self
    }

    /// Whether the descriptor lives in the directory with the given name
    pub fn is_in(&self, directory: &str) -> bool {
        self.family == directory
    }
}
