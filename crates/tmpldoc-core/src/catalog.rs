//! Static lookup tables used while documenting templates
//!
//! The catalog is a closed, pre-registered set of entries: builder images
//! that can be cross-linked, example values for well-known parameters and
//! the display names of product families. The built-in entries can be
//! extended (or overridden) from `tmpldoc.yaml`, but a lookup never invents
//! an entry that was not registered.

use indexmap::IndexMap;
use serde::Serialize;

use crate::config::Config;

/// Builder image -> documentation anchor
const IMAGE_LINKS: &[(&str, &str)] = &[
    (
        "jboss-eap6-openshift:${EAP_RELEASE}",
        "../../eap/eap-openshift{outfilesuffix}[`jboss-eap-6/eap-openshift`]",
    ),
    (
        "jboss-webserver3-tomcat7-openshift:${JWS_RELEASE}",
        "../../webserver/tomcat7-openshift{outfilesuffix}[`jboss-webserver/tomcat7-openshift`]",
    ),
    (
        "jboss-webserver3-tomcat8-openshift:${JWS_RELEASE}",
        "../../webserver/tomcat8-openshift{outfilesuffix}[`jboss-webserver/tomcat8-openshift`]",
    ),
];

/// Parameter name -> example value shown when nothing else is known
const PARAMETER_DEFAULTS: &[(&str, &str)] = &[
    ("APPLICATION_HOSTNAME", "secure-app.test.router.default.local"),
    (
        "GIT_URI",
        "https://github.com/jboss-openshift/openshift-examples.git",
    ),
    ("GIT_REF", "master"),
    ("GIT_CONTEXT_DIR", "helloworld"),
    ("GITHUB_TRIGGER_SECRET", "secret101"),
    ("GENERIC_TRIGGER_SECRET", "secret101"),
];

/// Product family directory -> display name
const FAMILIES: &[(&str, &str)] = &[
    ("amq", "JBoss A-MQ"),
    ("eap", "JBoss EAP"),
    ("webserver", "JBoss Web Server"),
];

/// The effective lookup tables
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub image_links: IndexMap<String, String>,
    pub parameter_defaults: IndexMap<String, String>,
    pub families: IndexMap<String, String>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    /// The compiled-in tables
    pub fn builtin() -> Self {
        Self {
            image_links: to_map(IMAGE_LINKS),
            parameter_defaults: to_map(PARAMETER_DEFAULTS),
            families: to_map(FAMILIES),
        }
    }

    /// The built-in tables extended with the entries from a configuration
    pub fn from_config(config: &Config) -> Self {
        let mut catalog = Self::builtin();
        catalog.image_links.extend(config.image_links.clone());
        catalog
            .parameter_defaults
            .extend(config.parameter_defaults.clone());
        catalog.families.extend(config.families.clone());
        catalog
    }

    /// Documentation anchor for a builder image
    pub fn image_link(&self, image: &str) -> Option<&str> {
        self.image_links.get(image).map(String::as_str)
    }

    /// Example value for a well-known parameter
    pub fn parameter_default(&self, name: &str) -> Option<&str> {
        self.parameter_defaults.get(name).map(String::as_str)
    }

    /// Display name of a product family, falling back to the directory name
    pub fn family_name<'a>(&'a self, directory: &'a str) -> &'a str {
        self.families
            .get(directory)
            .map(String::as_str)
            .unwrap_or(directory)
    }

    /// Registered builder images, in registration order
    pub fn registered_images(&self) -> impl Iterator<Item = &str> {
        self.image_links.keys().map(String::as_str)
    }
}

fn to_map(entries: &[(&str, &str)]) -> IndexMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
