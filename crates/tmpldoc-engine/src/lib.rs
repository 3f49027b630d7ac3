//! tmpldoc Engine - AsciiDoc page rendering
//!
//! This crate renders extracted documents with MiniJinja:
//! - one page per template (`template.adoc.j2`)
//! - the README index of every family (`README.adoc.j2`)
//!
//! Both templates are embedded and can be overridden from `tmpldoc.yaml`.
//! Template errors carry their source so miette can point at the failing line.

pub mod engine;
pub mod error;

pub use engine::{AUTOGEN_WARNING, Engine, EngineBuilder, PAGE_TEMPLATE, README_TEMPLATE};
pub use error::{AVAILABLE_FILTERS, EngineError, Result, TemplateError, TemplateErrorKind, suggest_filter};
