//! Batch extraction over a template repository
//!
//! A repository holds one directory per product family, each containing
//! JSON descriptors. Every descriptor is extracted independently: one that
//! cannot be parsed or extracted is recorded as a [`BatchIssue`] and the
//! batch moves on.

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tmpldoc_core::{Catalog, Config, Descriptor, SourceContext};
use tracing::debug;
use walkdir::WalkDir;

use crate::error::{BatchIssue, ExtractError, IssueSeverity, Result};
use crate::orchestrator::{ExtractedDocument, Extractor};

/// Editor swap files left next to descriptors
const SWAP_SUFFIX: &str = ".swp";

/// Documents extracted from one family directory
#[derive(Debug, Clone)]
pub struct FamilyResult {
    /// Directory name (`eap`, `amq`, ...)
    pub directory: String,
    /// Display name from the catalog
    pub display_name: String,
    pub documents: Vec<ExtractedDocument>,
}

impl FamilyResult {
    /// Identifiers of the extracted documents, sorted
    pub fn templates(&self) -> Vec<String> {
        let mut templates: Vec<String> = self.documents.iter().map(|d| d.template.clone()).collect();
        templates.sort();
        templates
    }
}

/// README entry for one family
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FamilyIndex {
    pub directory: String,
    pub name: String,
    pub templates: Vec<String>,
}

/// Outcome of a batch
#[derive(Debug, Clone, Default)]
pub struct BatchResult {
    pub families: Vec<FamilyResult>,
    pub issues: Vec<BatchIssue>,
}

impl BatchResult {
    pub fn documents(&self) -> impl Iterator<Item = &ExtractedDocument> {
        self.families.iter().flat_map(|f| f.documents.iter())
    }

    pub fn document_count(&self) -> usize {
        self.families.iter().map(|f| f.documents.len()).sum()
    }

    /// Number of issues with the given severity
    pub fn count(&self, severity: IssueSeverity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }

    /// The README index: every family with its document identifiers
    pub fn index(&self) -> Vec<FamilyIndex> {
        self.families
            .iter()
            .map(|f| FamilyIndex {
                directory: f.directory.clone(),
                name: f.display_name.clone(),
                templates: f.templates(),
            })
            .collect()
    }
}

/// Extracts every descriptor of a repository
pub struct Batch<'a> {
    config: &'a Config,
    extractor: Extractor<'a>,
    catalog: &'a Catalog,
    output_dir: Option<PathBuf>,
}

impl<'a> Batch<'a> {
    pub fn new(config: &'a Config, catalog: &'a Catalog) -> Self {
        Self {
            config,
            extractor: Extractor::new(catalog),
            catalog,
            output_dir: None,
        }
    }

    /// Never treat the generated output directory as a family
    pub fn exclude_output(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Family directories of the repository, sorted by name
    pub fn family_dirs(&self, root: &Path) -> Result<Vec<PathBuf>> {
        if !root.is_dir() {
            return Err(ExtractError::DirectoryNotFound(root.to_path_buf()));
        }

        // Absent until the first run writes it
        let output = self
            .output_dir
            .as_ref()
            .and_then(|dir| fs::canonicalize(dir).ok());

        let mut dirs = Vec::new();
        for entry in fs::read_dir(root)? {
            let path = entry?.path();
            if !path.is_dir() {
                continue;
            }
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            if self.config.is_ignored(&name) {
                continue;
            }
            if output.is_some() && fs::canonicalize(&path).ok() == output {
                debug!(dir = %path.display(), "skipping output directory");
                continue;
            }
            dirs.push(path);
        }

        dirs.sort();
        Ok(dirs)
    }

    /// Run the batch
    pub fn run(&self, root: &Path) -> Result<BatchResult> {
        let mut result = BatchResult::default();

        for dir in self.family_dirs(root)? {
            let family = self.run_family(&dir, &mut result.issues);
            result.families.push(family);
        }

        Ok(result)
    }

    fn run_family(&self, dir: &Path, issues: &mut Vec<BatchIssue>) -> FamilyResult {
        let directory = dir
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let mut documents = Vec::new();

        for path in descriptor_files(dir) {
            let source = SourceContext::new(directory.as_str(), path.as_path());
            match self.extract_file(&source) {
                Ok(document) => {
                    debug!(file = %path.display(), template = %document.template, "extracted");
                    documents.push(document);
                }
                Err(err) => {
                    // Recorded issues are reported once, by the caller
                    let issue = BatchIssue::from_error(path.clone(), &err);
                    debug!(file = %path.display(), severity = issue.severity.label(), "{}", err);
                    issues.push(issue);
                }
            }
        }

        FamilyResult {
            display_name: self.catalog.family_name(&directory).to_string(),
            directory,
            documents,
        }
    }

    fn extract_file(&self, source: &SourceContext) -> Result<ExtractedDocument> {
        let descriptor = Descriptor::from_file(&source.path)?;
        self.extractor.extract(&descriptor, source)
    }
}

/// Descriptor files directly inside a family directory, sorted by name
pub fn descriptor_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| !e.file_name().to_string_lossy().ends_with(SWAP_SUFFIX))
        .map(|e| e.into_path())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SERVICE_TEMPLATE: &str = r#"{
        "labels": { "template": "LABEL" },
        "objects": [
            { "kind": "Service", "metadata": { "name": "app", "annotations": { "description": "App" } }, "spec": { "ports": [ { "port": 8080 } ] } }
        ]
    }"#;

    fn write(dir: &Path, relative: &str, content: &str) {
        let path = dir.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn template(label: &str) -> String {
        SERVICE_TEMPLATE.replace("LABEL", label)
    }

    #[test]
    fn test_batch_isolates_failures() {
        let root = TempDir::new().unwrap();
        write(root.path(), "eap/eap64-basic-s2i.json", &template("eap64-basic-s2i"));
        write(root.path(), "eap/no-label.json", r#"{ "labels": {}, "objects": [] }"#);
        write(root.path(), "eap/broken.json", "{ not json");
        write(
            root.path(),
            "eap/no-description.json",
            r#"{ "labels": { "template": "x" }, "objects": [ { "kind": "Service", "metadata": { "name": "a" } } ] }"#,
        );
        write(root.path(), "eap/zz-last.json", &template("eap64-https-s2i"));

        let config = Config::default();
        let catalog = Catalog::builtin();
        let result = Batch::new(&config, &catalog).run(root.path()).unwrap();

        assert_eq!(result.document_count(), 2);
        assert_eq!(result.count(IssueSeverity::Skipped), 1);
        assert_eq!(result.count(IssueSeverity::Failed), 2);

        let skipped: Vec<_> = result
            .issues
            .iter()
            .filter(|i| i.severity == IssueSeverity::Skipped)
            .collect();
        assert!(skipped[0].file.ends_with("eap/no-label.json"));
        assert!(skipped[0].message.contains("no-label.json"));
    }

    #[test]
    fn test_batch_skips_swap_and_ignored_dirs() {
        let root = TempDir::new().unwrap();
        write(root.path(), "amq/amq62-basic.json", &template("amq62-basic"));
        write(root.path(), "amq/.amq62-basic.json.swp", "binary junk");
        write(root.path(), "docs/amq/amq62-basic.adoc", "generated");
        write(root.path(), "README.md", "not a family");

        let config = Config::default();
        let catalog = Catalog::builtin();
        let result = Batch::new(&config, &catalog).run(root.path()).unwrap();

        assert_eq!(result.families.len(), 1);
        assert_eq!(result.families[0].directory, "amq");
        assert_eq!(result.families[0].display_name, "JBoss A-MQ");
        assert!(result.issues.is_empty());
    }

    #[test]
    fn test_batch_skips_output_dir() {
        let root = TempDir::new().unwrap();
        write(root.path(), "eap/eap64-basic-s2i.json", &template("eap64-basic-s2i"));
        write(root.path(), "site/README.adoc", "= Application Templates");
        write(root.path(), "site/eap/eap64-basic-s2i.adoc", "generated");

        let config = Config::default();
        let catalog = Catalog::builtin();

        let result = Batch::new(&config, &catalog).run(root.path()).unwrap();
        assert_eq!(result.count(IssueSeverity::Failed), 1);

        let result = Batch::new(&config, &catalog)
            .exclude_output(root.path().join("site"))
            .run(root.path())
            .unwrap();
        assert_eq!(result.families.len(), 1);
        assert_eq!(result.families[0].directory, "eap");
        assert!(result.issues.is_empty());
    }

    #[test]
    fn test_batch_output_dir_not_yet_written() {
        let root = TempDir::new().unwrap();
        write(root.path(), "eap/eap64-basic-s2i.json", &template("eap64-basic-s2i"));

        let config = Config::default();
        let catalog = Catalog::builtin();
        let result = Batch::new(&config, &catalog)
            .exclude_output(root.path().join("site"))
            .run(root.path())
            .unwrap();

        assert_eq!(result.document_count(), 1);
    }

    #[test]
    fn test_index_is_sorted_by_family_and_template() {
        let root = TempDir::new().unwrap();
        write(root.path(), "webserver/b.json", &template("jws30-tomcat8-basic-s2i"));
        write(root.path(), "webserver/a.json", &template("jws30-tomcat7-basic-s2i"));
        write(root.path(), "secrets/eap.json", r#"{ "labels": { "template": "eap-app-secret" } }"#);

        let config = Config::default();
        let catalog = Catalog::builtin();
        let index = Batch::new(&config, &catalog).run(root.path()).unwrap().index();

        assert_eq!(
            index,
            vec![
                FamilyIndex {
                    directory: "secrets".to_string(),
                    name: "secrets".to_string(),
                    templates: vec!["eap-app-secret".to_string()],
                },
                FamilyIndex {
                    directory: "webserver".to_string(),
                    name: "JBoss Web Server".to_string(),
                    templates: vec![
                        "jws30-tomcat7-basic-s2i".to_string(),
                        "jws30-tomcat8-basic-s2i".to_string()
                    ],
                },
            ]
        );
    }

    #[test]
    fn test_missing_root() {
        let config = Config::default();
        let catalog = Catalog::builtin();
        let err = Batch::new(&config, &catalog)
            .run(Path::new("/nonexistent/templates"))
            .unwrap_err();

        assert!(matches!(err, ExtractError::DirectoryNotFound(_)));
    }
}
