//! Category extractors
//!
//! One function per documentation category. Each takes a descriptor and
//! the catalog and returns the [`ExtractedTable`] for that category,
//! preserving the declaration order of the objects it walks. A descriptor
//! without the relevant objects yields an empty table; a required field
//! missing from an object aborts the extraction with
//! [`ExtractError::MissingField`](crate::ExtractError::MissingField).

mod container;
mod deployment;
mod objects;
mod parameters;

use serde::Serialize;
use tmpldoc_core::{Catalog, Descriptor, ObjectMeta};

use crate::error::{ExtractError, Result};
use crate::row::ExtractedTable;

pub use container::{container_env, container_images, container_ports, readiness_probes};
pub use deployment::{deploy_triggers, replicas, service_accounts, volume_purpose, volumes};
pub use objects::{build_configs, persistent_volume_claims, routes, services};
pub use parameters::parameters;

/// Signature shared by every extractor
pub type ExtractFn = fn(&Descriptor, &Catalog) -> Result<ExtractedTable>;

/// A documentation category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    Parameters,
    Service,
    Route,
    BuildConfig,
    PersistentVolumeClaim,
    ContainerImage,
    ReadinessProbe,
    ContainerPorts,
    ContainerEnv,
    DeployTrigger,
    Replicas,
    Volume,
    ServiceAccount,
}

impl Category {
    /// Key of the category in the page template context
    pub fn key(&self) -> &'static str {
        match self {
            Self::Parameters => "parameters",
            Self::Service => "Service",
            Self::Route => "Route",
            Self::BuildConfig => "BuildConfig",
            Self::PersistentVolumeClaim => "PersistentVolumeClaim",
            Self::ContainerImage => "image",
            Self::ReadinessProbe => "readinessProbe",
            Self::ContainerPorts => "ports",
            Self::ContainerEnv => "env",
            Self::DeployTrigger => "triggers",
            Self::Replicas => "replicas",
            Self::Volume => "volumes",
            Self::ServiceAccount => "serviceAccount",
        }
    }

    /// Object kind whose presence enables the category
    pub fn object_kind(&self) -> Option<&'static str> {
        match self {
            Self::Parameters => None,
            Self::Service => Some("Service"),
            Self::Route => Some("Route"),
            Self::BuildConfig => Some("BuildConfig"),
            Self::PersistentVolumeClaim => Some("PersistentVolumeClaim"),
            _ => Some("DeploymentConfig"),
        }
    }

    /// The extractor for this category
    pub fn extractor(&self) -> ExtractFn {
        match self {
            Self::Parameters => parameters,
            Self::Service => services,
            Self::Route => routes,
            Self::BuildConfig => build_configs,
            Self::PersistentVolumeClaim => persistent_volume_claims,
            Self::ContainerImage => container_images,
            Self::ReadinessProbe => readiness_probes,
            Self::ContainerPorts => container_ports,
            Self::ContainerEnv => container_env,
            Self::DeployTrigger => deploy_triggers,
            Self::Replicas => replicas,
            Self::Volume => volumes,
            Self::ServiceAccount => service_accounts,
        }
    }
}

/// `metadata.name` of an object, required for every documented object
fn object_name<'a>(kind: &'static str, metadata: &'a ObjectMeta) -> Result<&'a str> {
    metadata
        .name
        .as_deref()
        .ok_or_else(|| ExtractError::missing(kind, "<unnamed>", "metadata.name"))
}
