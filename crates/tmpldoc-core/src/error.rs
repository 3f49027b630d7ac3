//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Descriptor not found: {path}")]
    DescriptorNotFound { path: String },

    #[error("Invalid descriptor {path}: {source}")]
    InvalidDescriptor {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid tmpldoc.yaml: {message}")]
    InvalidConfig { message: String },

    #[error("Failed to parse tmpldoc.yaml: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
