//! Repository configuration (`tmpldoc.yaml`)

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{CoreError, Result};

/// Name of the configuration file looked up in the repository root
pub const CONFIG_FILE_NAME: &str = "tmpldoc.yaml";

/// Optional settings for a documentation run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory receiving the generated documents, relative to the root
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Top-level directories that are not product families
    #[serde(default = "default_ignore_dirs")]
    pub ignore_dirs: Vec<String>,

    /// Extra builder image links
    #[serde(default)]
    pub image_links: IndexMap<String, String>,

    /// Extra parameter example values
    #[serde(default)]
    pub parameter_defaults: IndexMap<String, String>,

    /// Extra family display names
    #[serde(default)]
    pub families: IndexMap<String, String>,

    /// Page template overriding the embedded one
    #[serde(default)]
    pub template: Option<PathBuf>,

    /// README template overriding the embedded one
    #[serde(default)]
    pub readme_template: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            ignore_dirs: default_ignore_dirs(),
            image_links: IndexMap::new(),
            parameter_defaults: IndexMap::new(),
            families: IndexMap::new(),
            template: None,
            readme_template: None,
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("docs")
}

fn default_ignore_dirs() -> Vec<String> {
    vec!["docs".to_string(), ".git".to_string()]
}

impl Config {
    /// Load a configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::InvalidConfig {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_yaml(&content)
    }

    /// Parse a configuration from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty file is a valid, empty configuration
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `tmpldoc.yaml` from the repository root, or the defaults
    pub fn discover<P: AsRef<Path>>(root: P) -> Result<Self> {
        let path = root.as_ref().join(CONFIG_FILE_NAME);
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Whether a top-level directory is excluded from documentation
    pub fn is_ignored(&self, directory: &str) -> bool {
        self.ignore_dirs.iter().any(|d| d == directory)
    }

    /// Output directory resolved against the repository root
    pub fn output_path(&self, root: &Path) -> PathBuf {
        if self.output_dir.is_absolute() {
            self.output_dir.clone()
        } else {
            root.join(&self.output_dir)
        }
    }

    fn validate(&self) -> Result<()> {
        if self.output_dir.as_os_str().is_empty() {
            return Err(CoreError::InvalidConfig {
                message: "outputDir must not be empty".to_string(),
            });
        }

        if let Some((image, _)) = self.image_links.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(CoreError::InvalidConfig {
                message: format!("imageLinks entry for '{}' has no anchor", image),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.output_dir, PathBuf::from("docs"));
        assert!(config.is_ignored("docs"));
        assert!(config.is_ignored(".git"));
        assert!(!config.is_ignored("eap"));
        assert!(config.template.is_none());
    }

    #[test]
    fn test_empty_yaml() {
        let config = Config::from_yaml("").unwrap();
        assert_eq!(config.output_dir, PathBuf::from("docs"));
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = Config::from_yaml(
            r#"
outputDir: site/templates
families:
  datagrid: JBoss Data Grid
"#,
        )
        .unwrap();

        assert_eq!(config.output_dir, PathBuf::from("site/templates"));
        assert!(config.is_ignored("docs"));
        assert_eq!(config.families.get("datagrid").map(String::as_str), Some("JBoss Data Grid"));
    }

    #[test]
    fn test_rejects_empty_image_anchor() {
        let err = Config::from_yaml(
            r#"
imageLinks:
  "some-image:1.0": ""
"#,
        )
        .unwrap_err();

        assert!(matches!(err, CoreError::InvalidConfig { .. }));
    }

    #[test]
    fn test_discover() {
        let dir = TempDir::new().unwrap();

        let config = Config::discover(dir.path()).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("docs"));

        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "outputDir: out\n").unwrap();
        let config = Config::discover(dir.path()).unwrap();
        assert_eq!(config.output_path(dir.path()), dir.path().join("out"));
    }
}
