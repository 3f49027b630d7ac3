//! tmpldoc Core - Core types for the application-template documentation generator
//!
//! This crate provides the foundational types used throughout tmpldoc:
//! - `Descriptor`: A parsed application template (labels, parameters, objects)
//! - `Catalog`: The static lookup tables (image links, parameter defaults, families)
//! - `Config`: The optional `tmpldoc.yaml` repository configuration
//! - `SourceContext`: Where a descriptor came from (product family directory, file)

pub mod catalog;
pub mod config;
pub mod context;
pub mod descriptor;
pub mod error;

pub use catalog::Catalog;
pub use config::{CONFIG_FILE_NAME, Config};
pub use context::SourceContext;
pub use descriptor::{
    BuildConfig, Container, ContainerPort, DeploymentConfig, Descriptor, EnvVar, Object,
    ObjectMeta, Parameter, PersistentVolumeClaim, Route, Scalar, Service, TEMPLATE_LABEL,
};
pub use error::{CoreError, Result};
