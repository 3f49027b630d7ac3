//! Top-level object extractors: Service, Route, BuildConfig, PersistentVolumeClaim

use indexmap::IndexSet;
use tmpldoc_core::{Catalog, Descriptor};

use super::{Category, object_name};
use crate::error::{ExtractError, Result};
use crate::row::{ExtractedTable, PLACEHOLDER};

/// Minimum similarity for an image to be suggested as a replacement
const SUGGESTION_THRESHOLD: f64 = 0.7;

/// One row per Service: name, first port, description
pub fn services(descriptor: &Descriptor, _catalog: &Catalog) -> Result<ExtractedTable> {
    let mut table = ExtractedTable::new(Category::Service);

    for service in descriptor.services() {
        let name = object_name("Service", &service.metadata)?;
        let port = service
            .spec
            .ports
            .first()
            .and_then(|p| p.port.as_ref())
            .ok_or_else(|| ExtractError::missing("Service", name, "spec.ports[0].port"))?;
        let description = service
            .metadata
            .annotation("description")
            .ok_or_else(|| {
                ExtractError::missing("Service", name, "metadata.annotations.description")
            })?;

        table.push_row([name.to_string(), port.to_string(), description.to_string()]);
    }

    Ok(table)
}

/// One row per Route: identifier, TLS status, host
pub fn routes(descriptor: &Descriptor, _catalog: &Catalog) -> Result<ExtractedTable> {
    let mut table = ExtractedTable::new(Category::Route);

    for route in descriptor.routes() {
        let id = route
            .identifier()
            .ok_or_else(|| ExtractError::missing("Route", "<unnamed>", "metadata.name"))?;
        let tls = match route.spec.tls.as_ref().and_then(|t| t.termination.as_deref()) {
            Some(termination) => format!("TLS {}", termination),
            None => "none".to_string(),
        };
        let host = route.spec.host.as_deref().unwrap_or(PLACEHOLDER);

        table.push_row([id.to_string(), tls, host.to_string()]);
    }

    Ok(table)
}

/// One row per BuildConfig: source image, documentation link, output image, triggers
///
/// The source image must be registered in the catalog's image links.
pub fn build_configs(descriptor: &Descriptor, catalog: &Catalog) -> Result<ExtractedTable> {
    let mut table = ExtractedTable::new(Category::BuildConfig);

    for build in descriptor.build_configs() {
        let name = object_name("BuildConfig", &build.metadata)?;
        let image = build.source_image().ok_or_else(|| {
            ExtractError::missing("BuildConfig", name, "spec.strategy.sourceStrategy.from.name")
        })?;
        let link = catalog
            .image_link(image)
            .ok_or_else(|| unregistered_image(catalog, name, image))?;
        let output = build.output_image().unwrap_or(PLACEHOLDER);

        // Display aggregate: ordering is not significant
        let triggers: IndexSet<&str> = build
            .spec
            .triggers
            .iter()
            .filter_map(|t| t.trigger_type.as_deref())
            .collect();
        let triggers = triggers.into_iter().collect::<Vec<_>>().join(", ");

        table.push_row([
            image.to_string(),
            format!("link:{}", link),
            output.to_string(),
            triggers,
        ]);
    }

    Ok(table)
}

fn unregistered_image(catalog: &Catalog, object: &str, image: &str) -> ExtractError {
    let closest = catalog
        .registered_images()
        .map(|known| (known, strsim::jaro_winkler(image, known)))
        .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.1.total_cmp(&b.1));

    let help = match closest {
        Some((known, _)) => Some(format!(
            "Did you mean '{}'? Otherwise register the image under `imageLinks` in tmpldoc.yaml",
            known
        )),
        None => {
            let known: Vec<&str> = catalog.registered_images().collect();
            if known.is_empty() {
                Some("Register the image under `imageLinks` in tmpldoc.yaml".to_string())
            } else {
                Some(format!(
                    "Registered images: {}. Add new ones under `imageLinks` in tmpldoc.yaml",
                    known.join(", ")
                ))
            }
        }
    };

    ExtractError::UnregisteredImage {
        object: object.to_string(),
        image: image.to_string(),
        help,
    }
}

/// One row per PersistentVolumeClaim: name, first access mode
pub fn persistent_volume_claims(
    descriptor: &Descriptor,
    _catalog: &Catalog,
) -> Result<ExtractedTable> {
    let mut table = ExtractedTable::new(Category::PersistentVolumeClaim);

    for claim in descriptor.persistent_volume_claims() {
        let name = object_name("PersistentVolumeClaim", &claim.metadata)?;
        let mode = claim.spec.access_modes.first().ok_or_else(|| {
            ExtractError::missing("PersistentVolumeClaim", name, "spec.accessModes[0]")
        })?;

        table.push_row([name.to_string(), mode.clone()]);
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn descriptor(objects: &str) -> Descriptor {
        Descriptor::from_json(&format!(
            r#"{{ "labels": {{ "template": "test" }}, "objects": {} }}"#,
            objects
        ))
        .unwrap()
    }

    fn rows(table: &ExtractedTable) -> Vec<Vec<String>> {
        table.rows().map(<[String]>::to_vec).collect()
    }

    #[test]
    fn test_service_row() {
        let d = descriptor(
            r#"[{
                "kind": "Service",
                "metadata": { "name": "foo", "annotations": { "description": "Foo service" } },
                "spec": { "ports": [ { "port": 8080 } ] }
            }]"#,
        );

        let table = services(&d, &Catalog::builtin()).unwrap();

        assert_eq!(rows(&table), vec![vec!["foo", "8080", "Foo service"]]);
        assert_eq!(table.render(), "\n|foo | `8080` | Foo service");
    }

    #[test]
    fn test_services_keep_declaration_order() {
        let d = descriptor(
            r#"[
                { "kind": "Service", "metadata": { "name": "secure-app", "annotations": { "description": "HTTPS" } }, "spec": { "ports": [ { "port": 8443 } ] } },
                { "kind": "Route", "metadata": { "name": "ignored" } },
                { "kind": "Service", "metadata": { "name": "app", "annotations": { "description": "HTTP" } }, "spec": { "ports": [ { "port": 8080 }, { "port": 8081 } ] } }
            ]"#,
        );

        let table = services(&d, &Catalog::builtin()).unwrap();
        let names: Vec<_> = table.rows().map(|r| r[0].clone()).collect();

        assert_eq!(names, vec!["secure-app", "app"]);
        assert_eq!(table.rows().nth(1).unwrap()[1], "8080");
    }

    #[test]
    fn test_service_without_description_is_fatal() {
        let d = descriptor(
            r#"[{ "kind": "Service", "metadata": { "name": "foo" }, "spec": { "ports": [ { "port": 8080 } ] } }]"#,
        );

        let err = services(&d, &Catalog::builtin()).unwrap_err();
        assert!(matches!(
            err,
            ExtractError::MissingField { field: "metadata.annotations.description", .. }
        ));
    }

    #[test]
    fn test_no_services_is_empty() {
        let d = descriptor("[]");
        assert!(services(&d, &Catalog::builtin()).unwrap().is_empty());
    }

    #[test]
    fn test_route_without_tls() {
        let d = descriptor(
            r#"[{ "kind": "Route", "id": "app-http-route", "spec": { "host": "app.example.com" } }]"#,
        );

        let table = routes(&d, &Catalog::builtin()).unwrap();
        assert_eq!(rows(&table), vec![vec!["app-http-route", "none", "app.example.com"]]);
    }

    #[test]
    fn test_route_with_tls_and_metadata_name() {
        let d = descriptor(
            r#"[{
                "kind": "Route",
                "metadata": { "name": "secure-eap-app" },
                "spec": { "host": "", "tls": { "termination": "passthrough" } }
            }, {
                "kind": "Route",
                "metadata": { "name": "bare" },
                "spec": { "tls": {} }
            }]"#,
        );

        let table = routes(&d, &Catalog::builtin()).unwrap();
        assert_eq!(
            rows(&table),
            vec![
                vec!["secure-eap-app", "TLS passthrough", ""],
                vec!["bare", "none", "--"],
            ]
        );
    }

    fn build_config(image: &str, triggers: &str) -> Descriptor {
        descriptor(&format!(
            r#"[{{
                "kind": "BuildConfig",
                "metadata": {{ "name": "eap-app" }},
                "spec": {{
                    "strategy": {{ "type": "Source", "sourceStrategy": {{ "from": {{ "kind": "ImageStreamTag", "name": "{}" }} }} }},
                    "output": {{ "to": {{ "kind": "ImageStreamTag", "name": "eap-app:latest" }} }},
                    "triggers": {}
                }}
            }}]"#,
            image, triggers
        ))
    }

    #[test]
    fn test_build_config_row() {
        let d = build_config(
            "jboss-eap6-openshift:${EAP_RELEASE}",
            r#"[ { "type": "GitHub" }, { "type": "Generic" }, { "type": "ImageChange" }, { "type": "GitHub" } ]"#,
        );

        let table = build_configs(&d, &Catalog::builtin()).unwrap();
        let row = table.rows().next().unwrap();

        assert_eq!(row[0], "jboss-eap6-openshift:${EAP_RELEASE}");
        assert_eq!(
            row[1],
            "link:../../eap/eap-openshift{outfilesuffix}[`jboss-eap-6/eap-openshift`]"
        );
        assert_eq!(row[2], "eap-app:latest");

        let triggers: HashSet<&str> = row[3].split(", ").collect();
        assert_eq!(triggers, HashSet::from(["GitHub", "Generic", "ImageChange"]));
        assert_eq!(row[3].split(", ").count(), 3);
    }

    #[test]
    fn test_build_config_trigger_set_is_stable() {
        let d = build_config(
            "jboss-webserver3-tomcat8-openshift:${JWS_RELEASE}",
            r#"[ { "type": "ImageChange" }, { "type": "GitHub" } ]"#,
        );
        let catalog = Catalog::builtin();

        let first = build_configs(&d, &catalog).unwrap();
        let second = build_configs(&d, &catalog).unwrap();
        let set = |t: &ExtractedTable| -> HashSet<String> {
            t.rows()
                .next()
                .unwrap()[3]
                .split(", ")
                .map(str::to_string)
                .collect()
        };

        assert_eq!(set(&first), set(&second));
        assert_eq!(set(&first).len(), 2);
    }

    #[test]
    fn test_build_config_unregistered_image() {
        let d = build_config("jboss-eap6-openshift:6.4", "[]");

        let err = build_configs(&d, &Catalog::builtin()).unwrap_err();
        match err {
            ExtractError::UnregisteredImage { object, image, help } => {
                assert_eq!(object, "eap-app");
                assert_eq!(image, "jboss-eap6-openshift:6.4");
                assert!(help.unwrap().contains("jboss-eap6-openshift:${EAP_RELEASE}"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_build_config_unrelated_image_lists_registered() {
        let d = build_config("postgresql:9.4", "[]");

        let err = build_configs(&d, &Catalog::builtin()).unwrap_err();
        let help = err.help_text().unwrap();
        assert!(help.starts_with("Registered images:"));
    }

    #[test]
    fn test_build_config_without_source_image() {
        let d = descriptor(r#"[{ "kind": "BuildConfig", "metadata": { "name": "docker-build" } }]"#);

        let err = build_configs(&d, &Catalog::builtin()).unwrap_err();
        assert!(matches!(err, ExtractError::MissingField { kind: "BuildConfig", .. }));
    }

    #[test]
    fn test_persistent_volume_claim_row() {
        let d = descriptor(
            r#"[{
                "kind": "PersistentVolumeClaim",
                "metadata": { "name": "eap-app-claim" },
                "spec": { "accessModes": [ "ReadWriteOnce", "ReadOnlyMany" ] }
            }]"#,
        );

        let table = persistent_volume_claims(&d, &Catalog::builtin()).unwrap();
        assert_eq!(rows(&table), vec![vec!["eap-app-claim", "ReadWriteOnce"]]);
    }

    #[test]
    fn test_persistent_volume_claim_without_access_mode() {
        let d = descriptor(r#"[{ "kind": "PersistentVolumeClaim", "metadata": { "name": "claim" } }]"#);

        assert!(persistent_volume_claims(&d, &Catalog::builtin()).is_err());
    }
}
