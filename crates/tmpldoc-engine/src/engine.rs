//! Page renderer based on MiniJinja

use minijinja::{Environment, UndefinedBehavior};
use serde::Serialize;
use std::path::Path;
use tmpldoc_core::Config;
use tmpldoc_extract::{ExtractedDocument, FamilyIndex, PageContext};

use crate::error::{EngineError, Result, TemplateError};

/// Name of the documentation page template
pub const PAGE_TEMPLATE: &str = "template.adoc.j2";

/// Name of the README index template
pub const README_TEMPLATE: &str = "README.adoc.j2";

const DEFAULT_PAGE: &str = include_str!("../templates/template.adoc.j2");
const DEFAULT_README: &str = include_str!("../templates/README.adoc.j2");

/// Comment block written at the top of every generated file
pub const AUTOGEN_WARNING: &str = "////
    AUTOGENERATED FILE - this file was generated via tmpldoc.
    Changes to .adoc or HTML files may be overwritten! Please change the
    generator or the input template (templates/*.adoc.j2)
////

";

/// Engine builder
pub struct EngineBuilder {
    page_template: String,
    readme_template: String,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self {
            page_template: DEFAULT_PAGE.to_string(),
            readme_template: DEFAULT_README.to_string(),
        }
    }

    /// Use the template overrides of a configuration, resolved against `root`
    pub fn from_config(config: &Config, root: &Path) -> Result<Self> {
        let mut builder = Self::new();
        if let Some(path) = &config.template {
            builder.page_template = read_override(&root.join(path))?;
        }
        if let Some(path) = &config.readme_template {
            builder.readme_template = read_override(&root.join(path))?;
        }
        Ok(builder)
    }

    /// Replace the page template
    pub fn page_template(mut self, source: impl Into<String>) -> Self {
        self.page_template = source.into();
        self
    }

    /// Replace the README template
    pub fn readme_template(mut self, source: impl Into<String>) -> Self {
        self.readme_template = source.into();
        self
    }

    /// Build the engine, compiling both templates
    pub fn build(self) -> Result<Engine> {
        let mut env = Environment::new();

        // Optional page sections are simply absent from the context
        env.set_undefined_behavior(UndefinedBehavior::Lenient);
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);

        add_template(&mut env, PAGE_TEMPLATE, &self.page_template)?;
        add_template(&mut env, README_TEMPLATE, &self.readme_template)?;

        Ok(Engine {
            env,
            page_source: self.page_template,
            readme_source: self.readme_template,
        })
    }
}

fn read_override(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| EngineError::TemplateFile {
        path: path.to_path_buf(),
        source,
    })
}

fn add_template(env: &mut Environment<'static>, name: &'static str, source: &str) -> Result<()> {
    env.add_template_owned(name, source.to_string())
        .map_err(|e| EngineError::Template(TemplateError::from_minijinja(e, name, source)))
}

/// Renders documentation pages and the README index
pub struct Engine {
    env: Environment<'static>,
    page_source: String,
    readme_source: String,
}

impl Engine {
    /// Engine with the embedded templates
    pub fn new() -> Result<Self> {
        EngineBuilder::new().build()
    }

    /// Create a builder
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    /// Render the page of an extracted document, including the generated-file header
    pub fn render_document(&self, document: &ExtractedDocument) -> Result<String> {
        self.render_page(&document.page())
    }

    /// Render a page context, including the generated-file header
    pub fn render_page(&self, page: &PageContext) -> Result<String> {
        let body = self.render(PAGE_TEMPLATE, &self.page_source, page)?;
        Ok(format!("{}{}", AUTOGEN_WARNING, body))
    }

    /// Render the README index, including the generated-file header
    pub fn render_readme(&self, families: &[FamilyIndex]) -> Result<String> {
        let ctx = minijinja::context! { families => families };
        let body = self.render(README_TEMPLATE, &self.readme_source, ctx)?;
        Ok(format!("{}{}", AUTOGEN_WARNING, body))
    }

    fn render<S: Serialize>(&self, name: &str, source: &str, ctx: S) -> Result<String> {
        let tmpl = self
            .env
            .get_template(name)
            .map_err(|e| EngineError::Template(TemplateError::from_minijinja(e, name, source)))?;

        tmpl.render(ctx)
            .map_err(|e| EngineError::Template(TemplateError::from_minijinja(e, name, source)))
    }
}
