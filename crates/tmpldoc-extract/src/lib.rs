//! tmpldoc Extract - documentation tables from application templates
//!
//! This crate turns a parsed [`Descriptor`](tmpldoc_core::Descriptor) into
//! per-category documentation tables:
//!
//! | Category                | Rows                                              |
//! |-------------------------|---------------------------------------------------|
//! | `parameters`            | name, matching variable, description, value, required |
//! | `Service`               | name, first port, description                     |
//! | `Route`                 | identifier, TLS status, host                      |
//! | `BuildConfig`           | source image, documentation link, output, triggers |
//! | `PersistentVolumeClaim` | name, first access mode                           |
//! | `image`                 | deployment, image                                 |
//! | `readinessProbe`        | code block with the probe command                 |
//! | `ports` / `env`         | one group per deployment                          |
//! | `triggers` / `replicas` / `serviceAccount` | deployment, value              |
//! | `volumes`               | deployment, volume, mount path, purpose, read-only |
//!
//! Cross-referenced columns (a parameter's environment variable, a variable's
//! description) go through the fuzzy [`FieldResolver`]; cells that cannot be
//! resolved show the `--` placeholder.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use tmpldoc_core::{Catalog, Config, Descriptor, SourceContext};
//! use tmpldoc_extract::{Batch, Extractor};
//!
//! let catalog = Catalog::builtin();
//!
//! // A single descriptor
//! let path = Path::new("eap/eap64-basic-s2i.json");
//! let descriptor = Descriptor::from_file(path).unwrap();
//! let document = Extractor::new(&catalog)
//!     .extract(&descriptor, &SourceContext::for_file(path))
//!     .unwrap();
//! println!("{}", document.template);
//!
//! // A whole repository
//! let config = Config::default();
//! let result = Batch::new(&config, &catalog).run(Path::new(".")).unwrap();
//! for issue in &result.issues {
//!     eprintln!("{}", issue);
//! }
//! ```

pub mod batch;
pub mod error;
pub mod extractors;
pub mod orchestrator;
pub mod resolver;
pub mod row;

pub use batch::{Batch, BatchResult, FamilyIndex, FamilyResult, descriptor_files};
pub use error::{BatchIssue, ExtractError, IssueSeverity, Result};
pub use extractors::{Category, ExtractFn, volume_purpose};
pub use orchestrator::{
    ExtractedDocument, Extractor, OBJECT_CATEGORIES, PageContext, SECTION_POLICIES, Section,
    SectionPolicy, SecretsSection,
};
pub use resolver::{Candidate, Field, FieldResolver, NameMatcher};
pub use row::{Block, CELL_SEPARATOR, ExtractedTable, PLACEHOLDER, build_row, fix_width};
