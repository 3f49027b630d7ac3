//! Container extractors: image, readiness probe, ports, environment
//!
//! Only the first container of each DeploymentConfig is read. Additional
//! containers (sidecars) are not documented, and a deployment declaring no
//! container at all cannot be documented by these categories.

use tmpldoc_core::{Catalog, Container, DeploymentConfig, Descriptor, Scalar};

use super::{Category, object_name};
use crate::error::{ExtractError, Result};
use crate::resolver::{Field, FieldResolver};
use crate::row::{ExtractedTable, PLACEHOLDER};

const KIND: &str = "DeploymentConfig";

/// Name and first container of a deployment
fn first_container(deployment: &DeploymentConfig) -> Result<(&str, &Container)> {
    let name = object_name(KIND, &deployment.metadata)?;
    let container = deployment
        .first_container()
        .ok_or_else(|| ExtractError::missing(KIND, name, "spec.template.spec.containers[0]"))?;

    Ok((name, container))
}

fn display(value: Option<&Scalar>) -> String {
    value
        .filter(|v| !v.is_blank())
        .map(ToString::to_string)
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// One row per DeploymentConfig: name, image of the first container
pub fn container_images(descriptor: &Descriptor, _catalog: &Catalog) -> Result<ExtractedTable> {
    let mut table = ExtractedTable::new(Category::ContainerImage);

    for deployment in descriptor.deployment_configs() {
        let (name, container) = first_container(deployment)?;
        let image = container
            .image
            .as_deref()
            .ok_or_else(|| ExtractError::missing(KIND, name, "containers[0].image"))?;

        table.push_row([name, image]);
    }

    Ok(table)
}

/// One listing per DeploymentConfig whose first container has an exec readiness probe
pub fn readiness_probes(descriptor: &Descriptor, _catalog: &Catalog) -> Result<ExtractedTable> {
    let mut table = ExtractedTable::new(Category::ReadinessProbe);

    for deployment in descriptor.deployment_configs() {
        let (name, container) = first_container(deployment)?;
        let Some(exec) = container.readiness_probe.as_ref().and_then(|p| p.exec.as_ref()) else {
            continue;
        };

        table.push_listing(name, exec.command.join(" "));
    }

    Ok(table)
}

/// Per DeploymentConfig, a group of one row per container port
pub fn container_ports(descriptor: &Descriptor, _catalog: &Catalog) -> Result<ExtractedTable> {
    let mut table = ExtractedTable::new(Category::ContainerPorts);

    for deployment in descriptor.deployment_configs() {
        let (name, container) = first_container(deployment)?;
        if container.ports.is_empty() {
            continue;
        }

        table.push_group(container.ports.len(), name);
        for port in &container.ports {
            table.push_row([
                display(port.name.as_ref()),
                display(port.container_port.as_ref()),
                display(port.protocol.as_ref()),
            ]);
        }
    }

    Ok(table)
}

/// Per DeploymentConfig, a group of one row per environment variable
///
/// Descriptions come from the matching template parameter. Variables set
/// through `valueFrom` show the placeholder: indirect values are not
/// resolved.
pub fn container_env(descriptor: &Descriptor, catalog: &Catalog) -> Result<ExtractedTable> {
    let mut table = ExtractedTable::new(Category::ContainerEnv);
    let resolver = FieldResolver::new(catalog);

    for deployment in descriptor.deployment_configs() {
        let (name, container) = first_container(deployment)?;
        if container.env.is_empty() {
            continue;
        }

        table.push_group(container.env.len(), name);
        for var in &container.env {
            let description = resolver.resolve(&descriptor.parameters, &var.name, Field::Description);
            let value = var
                .value
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| PLACEHOLDER.to_string());

            table.push_row([var.name.clone(), description, value]);
        }
    }

    Ok(table)
}
