//! DeploymentConfig scalar extractors: triggers, replicas, service accounts, volumes
//!
//! Each emits at most one row per DeploymentConfig, and only when the field
//! it reads is present on the deployment.

use tmpldoc_core::{Catalog, DeploymentConfig, Descriptor};

use super::{Category, object_name};
use crate::error::{ExtractError, Result};
use crate::row::{ExtractedTable, PLACEHOLDER};

const KIND: &str = "DeploymentConfig";

/// How a volume purpose is derived once a rule matches
#[derive(Debug, Clone, Copy)]
enum Purpose {
    Fixed(&'static str),
    /// The second `-`-delimited token of the volume name
    SecondToken,
}

/// Volume purpose rules, first match wins
const PURPOSE_RULES: &[(&[&str], Purpose)] = &[
    (&["certificate", "keystore", "secret"], Purpose::Fixed("ssl certs")),
    (&["amq"], Purpose::Fixed("kahadb")),
    (&["pvol"], Purpose::SecondToken),
];

/// Classify what a volume is used for from its name
pub fn volume_purpose(name: &str) -> &str {
    let rule = PURPOSE_RULES
        .iter()
        .find(|(needles, _)| needles.iter().any(|n| name.contains(n)));

    match rule {
        Some((_, Purpose::Fixed(purpose))) => *purpose,
        Some((_, Purpose::SecondToken)) => name.split('-').nth(1).unwrap_or(PLACEHOLDER),
        None => PLACEHOLDER,
    }
}

/// One row per DeploymentConfig with triggers: name, first trigger type
pub fn deploy_triggers(descriptor: &Descriptor, _catalog: &Catalog) -> Result<ExtractedTable> {
    let mut table = ExtractedTable::new(Category::DeployTrigger);

    for deployment in descriptor.deployment_configs() {
        let Some(trigger) = deployment.spec.triggers.first() else {
            continue;
        };
        let name = object_name(KIND, &deployment.metadata)?;
        let trigger_type = trigger
            .trigger_type
            .as_deref()
            .ok_or_else(|| ExtractError::missing(KIND, name, "spec.triggers[0].type"))?;

        table.push_row([name, trigger_type]);
    }

    Ok(table)
}

/// One row per DeploymentConfig declaring a replica count
pub fn replicas(descriptor: &Descriptor, _catalog: &Catalog) -> Result<ExtractedTable> {
    let mut table = ExtractedTable::new(Category::Replicas);

    for deployment in descriptor.deployment_configs() {
        let Some(replicas) = deployment.spec.replicas.as_ref() else {
            continue;
        };
        let name = object_name(KIND, &deployment.metadata)?;

        table.push_row([name.to_string(), replicas.to_string()]);
    }

    Ok(table)
}

/// One row per DeploymentConfig naming a service account, on its pod template
/// or its own spec
pub fn service_accounts(descriptor: &Descriptor, _catalog: &Catalog) -> Result<ExtractedTable> {
    let mut table = ExtractedTable::new(Category::ServiceAccount);

    for deployment in descriptor.deployment_configs() {
        let Some(account) = deployment.service_account() else {
            continue;
        };
        let name = object_name(KIND, &deployment.metadata)?;

        table.push_row([name, account]);
    }

    Ok(table)
}

/// One row per DeploymentConfig with volumes
///
/// Reads the first volume (pod template first, then the deployment spec) and
/// the first mount of the
/// first container: deployment, volume name, mount path, purpose, read-only.
pub fn volumes(descriptor: &Descriptor, _catalog: &Catalog) -> Result<ExtractedTable> {
    let mut table = ExtractedTable::new(Category::Volume);

    for deployment in descriptor.deployment_configs() {
        if deployment.volumes().is_empty() {
            continue;
        }
        table.push_row(volume_row(deployment)?);
    }

    Ok(table)
}

fn volume_row(deployment: &DeploymentConfig) -> Result<[String; 5]> {
    let name = object_name(KIND, &deployment.metadata)?;
    let volume = deployment
        .volumes()
        .first()
        .and_then(|v| v.name.as_deref())
        .ok_or_else(|| ExtractError::missing(KIND, name, "volumes[0].name"))?;
    let mount = deployment
        .first_container()
        .and_then(|c| c.volume_mounts.first())
        .ok_or_else(|| ExtractError::missing(KIND, name, "containers[0].volumeMounts[0]"))?;
    let path = mount
        .mount_path
        .as_deref()
        .ok_or_else(|| ExtractError::missing(KIND, name, "volumeMounts[0].mountPath"))?;
    let read_only = mount.read_only.unwrap_or(false);

    Ok([
        name.to_string(),
        volume.to_string(),
        path.to_string(),
        volume_purpose(volume).to_string(),
        read_only.to_string(),
    ])
}
