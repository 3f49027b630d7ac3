//! Application template descriptor model
//!
//! A descriptor is one JSON application template: a label map carrying the
//! `template` identity, optional metadata, the declared parameters and the
//! list of kind-tagged objects. Every nested structure is optional at the
//! serde level; the extractors decide which fields are required and report
//! missing ones themselves, so a descriptor only fails to parse when it is
//! not JSON or an object has no `kind`.

use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use crate::error::{CoreError, Result};

/// Label holding the descriptor identity
pub const TEMPLATE_LABEL: &str = "template";

/// A parsed application template
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Descriptor {
    /// Template labels (must contain `template`)
    #[serde(default)]
    pub labels: BTreeMap<String, String>,

    /// Template metadata
    #[serde(default)]
    pub metadata: ObjectMeta,

    /// Declared parameters, in declaration order
    #[serde(default)]
    pub parameters: Vec<Parameter>,

    /// Template objects, in declaration order (`None` when the key is absent)
    #[serde(default)]
    pub objects: Option<Vec<Object>>,
}

impl Descriptor {
    /// Parse a descriptor from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a descriptor from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CoreError::DescriptorNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|source| CoreError::InvalidDescriptor {
            path: path.display().to_string(),
            source,
        })
    }

    /// The `template` label, the stable identity of the descriptor
    pub fn template_label(&self) -> Option<&str> {
        self.labels.get(TEMPLATE_LABEL).map(String::as_str)
    }

    /// Human-readable description from the metadata annotations
    pub fn description(&self) -> Option<&str> {
        self.metadata.annotation("description")
    }

    /// All objects (empty when the `objects` key is absent)
    pub fn objects(&self) -> &[Object] {
        self.objects.as_deref().unwrap_or_default()
    }

    pub fn has_objects(&self) -> bool {
        self.objects.is_some()
    }

    pub fn services(&self) -> impl Iterator<Item = &Service> {
        self.objects().iter().filter_map(|o| match o {
            Object::Service(s) => Some(s),
            _ => None,
        })
    }

    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.objects().iter().filter_map(|o| match o {
            Object::Route(r) => Some(r),
            _ => None,
        })
    }

    pub fn build_configs(&self) -> impl Iterator<Item = &BuildConfig> {
        self.objects().iter().filter_map(|o| match o {
            Object::BuildConfig(b) => Some(b),
            _ => None,
        })
    }

    pub fn persistent_volume_claims(&self) -> impl Iterator<Item = &PersistentVolumeClaim> {
        self.objects().iter().filter_map(|o| match o {
            Object::PersistentVolumeClaim(p) => Some(p),
            _ => None,
        })
    }

    pub fn deployment_configs(&self) -> impl Iterator<Item = &DeploymentConfig> {
        self.objects().iter().filter_map(|o| match o {
            Object::DeploymentConfig(d) => Some(d),
            _ => None,
        })
    }

    /// Whether at least one object of the given kind is declared
    pub fn has_kind(&self, kind: &str) -> bool {
        self.objects().iter().any(|o| o.kind() == kind)
    }
}

/// Object metadata
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub annotations: BTreeMap<String, String>,

    #[serde(default)]
    pub labels: BTreeMap<String, String>,
}

impl ObjectMeta {
    pub fn annotation(&self, key: &str) -> Option<&str> {
        self.annotations.get(key).map(String::as_str)
    }
}

/// A JSON scalar rendered the way it appears in documentation
///
/// Strings are shown without quotes, numbers and booleans with their JSON
/// spelling and `null` as an empty string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Scalar(pub JsonValue);

impl Scalar {
    /// Whether the scalar is `null` or an empty string
    pub fn is_blank(&self) -> bool {
        match &self.0 {
            JsonValue::Null => true,
            JsonValue::String(s) => s.is_empty(),
            _ => false,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            JsonValue::Null => Ok(()),
            JsonValue::String(s) => f.write_str(s),
            other => write!(f, "{}", other),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self(JsonValue::String(value.to_string()))
    }
}

/// A template parameter
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub name: String,

    /// Default value
    #[serde(default)]
    pub value: Option<Scalar>,

    #[serde(default)]
    pub description: Option<String>,

    /// `None` means the template does not say
    #[serde(default)]
    pub required: Option<bool>,
}

impl Parameter {
    /// The default value, if declared and not blank
    pub fn default_value(&self) -> Option<String> {
        self.value
            .as_ref()
            .filter(|v| !v.is_blank())
            .map(ToString::to_string)
    }
}

/// A kind-tagged template object
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind")]
pub enum Object {
    Service(Service),
    Route(Route),
    BuildConfig(BuildConfig),
    PersistentVolumeClaim(PersistentVolumeClaim),
    DeploymentConfig(DeploymentConfig),
    /// Any kind without a documentation section (ImageStream, Secret, ...)
    #[serde(other)]
    Other,
}

impl Object {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Service(_) => "Service",
            Self::Route(_) => "Route",
            Self::BuildConfig(_) => "BuildConfig",
            Self::PersistentVolumeClaim(_) => "PersistentVolumeClaim",
            Self::DeploymentConfig(_) => "DeploymentConfig",
            Self::Other => "Other",
        }
    }
}

// =============================================================================
// Service
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    #[serde(default)]
    pub metadata: ObjectMeta,

    #[serde(default)]
    pub spec: ServiceSpec,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSpec {
    #[serde(default)]
    pub ports: Vec<ServicePort>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePort {
    #[serde(default)]
    pub port: Option<Scalar>,
}

// =============================================================================
// Route
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    /// Legacy (v1beta3) route identifier
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub metadata: ObjectMeta,

    #[serde(default)]
    pub spec: RouteSpec,
}

impl Route {
    /// The route identifier: legacy `id`, falling back to `metadata.name`
    pub fn identifier(&self) -> Option<&str> {
        self.id.as_deref().or(self.metadata.name.as_deref())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSpec {
    #[serde(default)]
    pub host: Option<String>,

    #[serde(default)]
    pub tls: Option<RouteTls>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteTls {
    #[serde(default)]
    pub termination: Option<String>,
}

// =============================================================================
// BuildConfig
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildConfig {
    #[serde(default)]
    pub metadata: ObjectMeta,

    #[serde(default)]
    pub spec: BuildConfigSpec,
}

impl BuildConfig {
    /// The S2I builder image (`spec.strategy.sourceStrategy.from.name`)
    pub fn source_image(&self) -> Option<&str> {
        self.spec
            .strategy
            .source_strategy
            .as_ref()
            .and_then(|s| s.from.as_ref())
            .and_then(|r| r.name.as_deref())
    }

    /// The output image (`spec.output.to.name`)
    pub fn output_image(&self) -> Option<&str> {
        self.spec.output.to.as_ref().and_then(|r| r.name.as_deref())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildConfigSpec {
    #[serde(default)]
    pub strategy: BuildStrategy,

    #[serde(default)]
    pub output: BuildOutput,

    #[serde(default)]
    pub triggers: Vec<Trigger>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildStrategy {
    #[serde(default, rename = "type")]
    pub strategy_type: Option<String>,

    #[serde(default)]
    pub source_strategy: Option<SourceStrategy>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceStrategy {
    #[serde(default)]
    pub from: Option<ObjectReference>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildOutput {
    #[serde(default)]
    pub to: Option<ObjectReference>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectReference {
    #[serde(default)]
    pub kind: Option<String>,

    #[serde(default)]
    pub name: Option<String>,
}

/// A build or deployment trigger
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trigger {
    #[serde(default, rename = "type")]
    pub trigger_type: Option<String>,
}

// =============================================================================
// PersistentVolumeClaim
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistentVolumeClaim {
    #[serde(default)]
    pub metadata: ObjectMeta,

    #[serde(default)]
    pub spec: PersistentVolumeClaimSpec,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistentVolumeClaimSpec {
    #[serde(default)]
    pub access_modes: Vec<String>,
}

// =============================================================================
// DeploymentConfig
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentConfig {
    #[serde(default)]
    pub metadata: ObjectMeta,

    #[serde(default)]
    pub spec: DeploymentConfigSpec,
}

impl DeploymentConfig {
    /// The pod template spec
    pub fn pod(&self) -> &PodSpec {
        &self.spec.template.spec
    }

    /// The first container of the pod template
    ///
    /// Only the first container of a deployment is documented; templates
    /// with sidecars get their additional containers ignored.
    pub fn first_container(&self) -> Option<&Container> {
        self.pod().containers.first()
    }

    /// Service account of the pod template, else of the deployment spec
    pub fn service_account(&self) -> Option<&str> {
        self.pod()
            .service_account
            .as_deref()
            .or(self.spec.service_account.as_deref())
    }

    /// Volumes of the pod template, else of the deployment spec
    pub fn volumes(&self) -> &[Volume] {
        if self.pod().volumes.is_empty() {
            &self.spec.volumes
        } else {
            &self.pod().volumes
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentConfigSpec {
    #[serde(default)]
    pub triggers: Vec<Trigger>,

    #[serde(default)]
    pub replicas: Option<Scalar>,

    #[serde(default)]
    pub template: PodTemplate,

    /// Legacy placement, outside the pod template
    #[serde(default)]
    pub service_account: Option<String>,

    #[serde(default)]
    pub volumes: Vec<Volume>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodTemplate {
    #[serde(default)]
    pub metadata: ObjectMeta,

    #[serde(default)]
    pub spec: PodSpec,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodSpec {
    #[serde(default)]
    pub containers: Vec<Container>,

    #[serde(default)]
    pub volumes: Vec<Volume>,

    #[serde(default)]
    pub service_account: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub image: Option<String>,

    #[serde(default)]
    pub ports: Vec<ContainerPort>,

    #[serde(default)]
    pub env: Vec<EnvVar>,

    #[serde(default)]
    pub volume_mounts: Vec<VolumeMount>,

    #[serde(default)]
    pub readiness_probe: Option<Probe>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerPort {
    #[serde(default)]
    pub name: Option<Scalar>,

    #[serde(default)]
    pub container_port: Option<Scalar>,

    #[serde(default)]
    pub protocol: Option<Scalar>,
}

/// A container environment variable
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvVar {
    pub name: String,

    /// Literal value
    #[serde(default)]
    pub value: Option<Scalar>,

    /// Indirect value source (secret, config map, field ref)
    #[serde(default)]
    pub value_from: Option<JsonValue>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeMount {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub mount_path: Option<String>,

    #[serde(default)]
    pub read_only: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Probe {
    #[serde(default)]
    pub exec: Option<ExecAction>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecAction {
    #[serde(default)]
    pub command: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_descriptor_deserialize() {
        let json = r#"{
            "kind": "Template",
            "labels": { "template": "eap64-basic-s2i" },
            "metadata": {
                "name": "eap64-basic-s2i",
                "annotations": { "description": "Basic EAP application" }
            },
            "parameters": [
                { "name": "APPLICATION_NAME", "value": "eap-app", "required": true },
                { "name": "GIT_REF", "description": "Git branch" }
            ],
            "objects": [
                { "kind": "Service", "metadata": { "name": "eap-app" } },
                { "kind": "ImageStream", "metadata": { "name": "eap-app" } }
            ]
        }"#;

        let descriptor = Descriptor::from_json(json).unwrap();

        assert_eq!(descriptor.template_label(), Some("eap64-basic-s2i"));
        assert_eq!(descriptor.description(), Some("Basic EAP application"));
        assert_eq!(descriptor.parameters.len(), 2);
        assert_eq!(descriptor.parameters[0].required, Some(true));
        assert_eq!(descriptor.parameters[1].required, None);
        assert_eq!(descriptor.objects().len(), 2);
        assert!(matches!(descriptor.objects()[1], Object::Other));
        assert!(descriptor.has_kind("Service"));
        assert!(!descriptor.has_kind("Route"));
    }

    #[test]
    fn test_missing_template_label() {
        let descriptor = Descriptor::from_json(r#"{ "labels": {} }"#).unwrap();
        assert_eq!(descriptor.template_label(), None);

        let descriptor = Descriptor::from_json("{}").unwrap();
        assert_eq!(descriptor.template_label(), None);
        assert!(!descriptor.has_objects());
    }

    #[test]
    fn test_objects_key_absent_vs_empty() {
        let absent = Descriptor::from_json(r#"{ "labels": { "template": "a" } }"#).unwrap();
        let empty =
            Descriptor::from_json(r#"{ "labels": { "template": "a" }, "objects": [] }"#).unwrap();

        assert!(!absent.has_objects());
        assert!(empty.has_objects());
        assert!(absent.objects().is_empty());
        assert!(empty.objects().is_empty());
    }

    #[test]
    fn test_object_without_kind_is_rejected() {
        let result = Descriptor::from_json(r#"{ "objects": [ { "metadata": {} } ] }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_scalar_display() {
        assert_eq!(Scalar(json!("eap-app")).to_string(), "eap-app");
        assert_eq!(Scalar(json!(8080)).to_string(), "8080");
        assert_eq!(Scalar(json!(true)).to_string(), "true");
        assert_eq!(Scalar(json!(null)).to_string(), "");
        assert!(Scalar(json!("")).is_blank());
        assert!(!Scalar(json!(0)).is_blank());
    }

    #[test]
    fn test_parameter_default_value() {
        let param: Parameter =
            serde_json::from_value(json!({ "name": "A", "value": "" })).unwrap();
        assert_eq!(param.default_value(), None);

        let param: Parameter =
            serde_json::from_value(json!({ "name": "A", "value": "x" })).unwrap();
        assert_eq!(param.default_value().as_deref(), Some("x"));
    }

    #[test]
    fn test_deployment_config_first_container() {
        let dc: DeploymentConfig = serde_json::from_value(json!({
            "metadata": { "name": "eap-app" },
            "spec": {
                "replicas": 1,
                "template": {
                    "spec": {
                        "serviceAccount": "eap-service-account",
                        "containers": [
                            { "name": "eap-app", "image": "eap-app" },
                            { "name": "sidecar", "image": "busybox" }
                        ]
                    }
                }
            }
        }))
        .unwrap();

        assert_eq!(dc.first_container().unwrap().image.as_deref(), Some("eap-app"));
        assert_eq!(dc.pod().service_account.as_deref(), Some("eap-service-account"));
        assert_eq!(dc.spec.replicas.as_ref().unwrap().to_string(), "1");
    }

    #[test]
    fn test_build_config_accessors() {
        let bc: BuildConfig = serde_json::from_value(json!({
            "spec": {
                "strategy": {
                    "type": "Source",
                    "sourceStrategy": {
                        "from": { "kind": "ImageStreamTag", "name": "jboss-eap6-openshift:${EAP_RELEASE}" }
                    }
                },
                "output": { "to": { "name": "eap-app" } },
                "triggers": [ { "type": "GitHub" }, { "type": "Generic" } ]
            }
        }))
        .unwrap();

        assert_eq!(bc.source_image(), Some("jboss-eap6-openshift:${EAP_RELEASE}"));
        assert_eq!(bc.output_image(), Some("eap-app"));
        assert_eq!(bc.spec.triggers.len(), 2);
    }

    #[test]
    fn test_from_file_not_found() {
        let err = Descriptor::from_file("/nonexistent/template.json").unwrap_err();
        assert!(matches!(err, CoreError::DescriptorNotFound { .. }));
    }

    #[test]
    fn test_from_file_invalid_json() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = Descriptor::from_file(&path).unwrap_err();
        assert!(matches!(err, CoreError::InvalidDescriptor { .. }));
    }
}
