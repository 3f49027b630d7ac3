//! Template parameter table

use tmpldoc_core::{Catalog, Descriptor, EnvVar};

use super::Category;
use crate::error::{ExtractError, Result};
use crate::resolver::{Field, FieldResolver};
use crate::row::{ExtractedTable, PLACEHOLDER};

/// One row per parameter: name, matching variable, description, value, required
///
/// Parameters are cross-referenced against the environment of the first
/// container of every DeploymentConfig. The value is the parameter's own
/// default when it declares one, otherwise the matching variable's value
/// or the catalog's example value.
pub fn parameters(descriptor: &Descriptor, catalog: &Catalog) -> Result<ExtractedTable> {
    let mut table = ExtractedTable::new(Category::Parameters);
    let environment = environment(descriptor)?;
    let resolver = FieldResolver::new(catalog);

    for param in &descriptor.parameters {
        let variable = resolver.resolve(environment.iter().copied(), &param.name, Field::Name);
        let description = param
            .description
            .clone()
            .unwrap_or_else(|| PLACEHOLDER.to_string());
        let value = param.default_value().unwrap_or_else(|| {
            resolver.resolve(environment.iter().copied(), &param.name, Field::Value)
        });
        let required = match param.required {
            Some(required) => required.to_string(),
            None => "?".to_string(),
        };

        table.push_row([param.name.clone(), variable, description, value, required]);
    }

    Ok(table)
}

/// First-container environment of every DeploymentConfig, in object order
fn environment(descriptor: &Descriptor) -> Result<Vec<&EnvVar>> {
    let mut environment = Vec::new();

    for deployment in descriptor.deployment_configs() {
        let container = deployment.first_container().ok_or_else(|| {
            let name = deployment.metadata.name.as_deref().unwrap_or("<unnamed>");
            ExtractError::missing("DeploymentConfig", name, "spec.template.spec.containers[0]")
        })?;
        environment.extend(container.env.iter());
    }

    Ok(environment)
}
