//! Per-descriptor extraction
//!
//! The [`Extractor`] runs every category whose presence predicate holds,
//! then applies the directory-driven section policies. The result is an
//! [`ExtractedDocument`]; [`ExtractedDocument::page`] flattens it into the
//! key/value context handed to the page renderer.

use indexmap::IndexMap;
use serde::Serialize;
use tmpldoc_core::{Catalog, Descriptor, SourceContext};
use tracing::debug;

use crate::error::{ExtractError, Result};
use crate::extractors::Category;
use crate::row::ExtractedTable;

/// Object categories, in page order
pub const OBJECT_CATEGORIES: &[Category] = &[
    Category::Service,
    Category::Route,
    Category::BuildConfig,
    Category::PersistentVolumeClaim,
    Category::ContainerImage,
    Category::ReadinessProbe,
    Category::ContainerPorts,
    Category::ContainerEnv,
    Category::DeployTrigger,
    Category::Replicas,
    Category::Volume,
    Category::ServiceAccount,
];

/// Explanatory page sections toggled by the source directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    /// How to create the secrets the template expects
    Secrets,
    /// How the application clusters
    Clustering,
}

impl Section {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Secrets => "secrets",
            Self::Clustering => "clustering",
        }
    }
}

/// When a section appears on a page
#[derive(Debug, Clone, Copy)]
pub struct SectionPolicy {
    pub section: Section,
    pub applies: fn(&SourceContext) -> bool,
}

/// Section policies, evaluated for descriptors that declare objects
pub const SECTION_POLICIES: &[SectionPolicy] = &[
    SectionPolicy {
        section: Section::Secrets,
        applies: outside_secrets_directory,
    },
    SectionPolicy {
        section: Section::Clustering,
        applies: in_eap_directory,
    },
];

/// The secrets templates document themselves
fn outside_secrets_directory(ctx: &SourceContext) -> bool {
    !ctx.is_in("secrets")
}

/// Only EAP templates cluster
fn in_eap_directory(ctx: &SourceContext) -> bool {
    ctx.is_in("eap")
}

/// Everything extracted from one descriptor
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedDocument {
    /// The `template` label
    pub template: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<ExtractedTable>,

    /// Object categories; `None` when the descriptor has no `objects`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub objects: Option<Vec<ExtractedTable>>,

    pub sections: Vec<Section>,

    pub source: SourceContext,
}

impl ExtractedDocument {
    pub fn has_section(&self, section: Section) -> bool {
        self.sections.contains(&section)
    }

    /// The object table for a category, if it was extracted
    pub fn table(&self, category: Category) -> Option<&ExtractedTable> {
        self.objects
            .as_ref()
            .and_then(|tables| tables.iter().find(|t| t.category == category))
    }

    /// Flatten into the page rendering context
    pub fn page(&self) -> PageContext {
        let objects = self.objects.as_ref().map(|tables| {
            tables
                .iter()
                .map(|t| (t.category.key(), t.render()))
                .collect::<IndexMap<_, _>>()
        });

        let secrets = self
            .has_section(Section::Secrets)
            .then(|| SecretsSection {
                templateabbrev: self.template.chars().take(3).collect(),
            });

        PageContext {
            template: self.template.clone(),
            description: self.description.clone(),
            parameters: self.parameters.as_ref().map(ExtractedTable::render),
            objects,
            secrets,
            clustering: self.has_section(Section::Clustering),
        }
    }
}

/// Context of the secrets section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecretsSection {
    /// First three characters of the template label (`eap`, `jws`, `amq`)
    pub templateabbrev: String,
}

/// Flat key/value data rendered into one documentation page
#[derive(Debug, Clone, Serialize)]
pub struct PageContext {
    pub template: String,
    pub description: Option<String>,
    pub parameters: Option<String>,
    /// Category key -> table markup (empty when nothing was extracted)
    pub objects: Option<IndexMap<&'static str, String>>,
    pub secrets: Option<SecretsSection>,
    pub clustering: bool,
}

/// Runs the category extractors over descriptors
#[derive(Debug, Clone, Copy)]
pub struct Extractor<'a> {
    catalog: &'a Catalog,
}

impl<'a> Extractor<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Extract every applicable category from a descriptor
    ///
    /// Fails with [`ExtractError::MissingIdentity`] when the descriptor has
    /// no `template` label, and with the first extractor error otherwise.
    pub fn extract(
        &self,
        descriptor: &Descriptor,
        source: &SourceContext,
    ) -> Result<ExtractedDocument> {
        let template = descriptor
            .template_label()
            .ok_or_else(|| ExtractError::MissingIdentity {
                path: source.path.clone(),
            })?
            .to_string();

        let parameters = if descriptor.has_objects() && is_present(Category::Parameters, descriptor) {
            Some(self.run(Category::Parameters, descriptor, &template)?)
        } else {
            None
        };

        let objects = if descriptor.has_objects() {
            let mut tables = Vec::new();
            for category in OBJECT_CATEGORIES {
                if !is_present(*category, descriptor) {
                    continue;
                }
                tables.push(self.run(*category, descriptor, &template)?);
            }
            Some(tables)
        } else {
            None
        };

        let sections = if descriptor.has_objects() {
            SECTION_POLICIES
                .iter()
                .filter(|policy| (policy.applies)(source))
                .map(|policy| policy.section)
                .collect()
        } else {
            Vec::new()
        };

        Ok(ExtractedDocument {
            template,
            description: descriptor.description().map(str::to_string),
            parameters,
            objects,
            sections,
            source: source.clone(),
        })
    }

    fn run(
        &self,
        category: Category,
        descriptor: &Descriptor,
        template: &str,
    ) -> Result<ExtractedTable> {
        let table = (category.extractor())(descriptor, self.catalog)?;
        debug!(
            template,
            category = category.key(),
            blocks = table.blocks.len(),
            "extracted category"
        );
        Ok(table)
    }
}

/// Whether the descriptor declares an object the category reads
fn is_present(category: Category, descriptor: &Descriptor) -> bool {
    match category.object_kind() {
        Some(kind) => descriptor.has_kind(kind),
        None => !descriptor.parameters.is_empty(),
    }
}
