//! Engine error types

use miette::{Diagnostic, NamedSource, SourceSpan};
use std::path::PathBuf;
use thiserror::Error;

/// Filters available to page templates (MiniJinja built-ins)
pub const AVAILABLE_FILTERS: &[&str] = &[
    "abs", "attr", "batch", "capitalize", "default", "dictsort", "escape", "first", "format",
    "items", "join", "last", "length", "list", "lower", "map", "max", "min", "replace",
    "reverse", "round", "safe", "select", "slice", "sort", "title", "tojson", "trim", "unique",
    "upper", "urlencode",
];

/// Minimum similarity for a filter to be suggested
const SUGGESTION_THRESHOLD: f64 = 0.8;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    #[error("Failed to read template override {path}: {source}")]
    TemplateFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// What went wrong in a page template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateErrorKind {
    /// Unclosed block, bad expression
    Syntax,
    UnknownFilter,
    UnknownFunction,
    /// Operation on a value of the wrong type
    Type,
    Render,
}

impl From<minijinja::ErrorKind> for TemplateErrorKind {
    fn from(kind: minijinja::ErrorKind) -> Self {
        use minijinja::ErrorKind;

        match kind {
            ErrorKind::SyntaxError => Self::Syntax,
            ErrorKind::UnknownFilter => Self::UnknownFilter,
            ErrorKind::UnknownFunction => Self::UnknownFunction,
            ErrorKind::InvalidOperation | ErrorKind::NonPrimitive | ErrorKind::NonKey => Self::Type,
            _ => Self::Render,
        }
    }
}

/// A page or README template failure, pointing at the template line
#[derive(Error, Debug, Diagnostic, Clone)]
#[error("{message}")]
#[diagnostic(code(tmpldoc::template::render))]
pub struct TemplateError {
    pub message: String,

    pub kind: TemplateErrorKind,

    #[source_code]
    pub src: NamedSource<String>,

    #[label("here")]
    pub span: Option<SourceSpan>,

    #[help]
    pub suggestion: Option<String>,
}

impl TemplateError {
    /// Wrap a MiniJinja error raised by the template `name`
    pub fn from_minijinja(err: minijinja::Error, name: &str, source: &str) -> Self {
        let kind = TemplateErrorKind::from(err.kind());
        let message = match err.detail() {
            Some(detail) => format!("{} ({})", err.kind(), detail),
            None => err.kind().to_string(),
        };

        Self {
            message,
            kind,
            src: NamedSource::new(name, source.to_string()),
            span: err.line().and_then(|line| line_span(source, line)),
            suggestion: suggestion(&err, kind),
        }
    }
}

/// Span covering a 1-based line of the source
fn line_span(source: &str, line: usize) -> Option<SourceSpan> {
    let offset: usize = source
        .split_inclusive('\n')
        .take(line.checked_sub(1)?)
        .map(str::len)
        .sum();
    let text = source.lines().nth(line - 1)?;

    Some(SourceSpan::new(offset.into(), text.len()))
}

fn suggestion(err: &minijinja::Error, kind: TemplateErrorKind) -> Option<String> {
    match kind {
        TemplateErrorKind::UnknownFilter => {
            Some(suggest_filter(unknown_filter_name(err).unwrap_or_default()))
        }
        TemplateErrorKind::UnknownFunction => {
            Some("page templates only have MiniJinja's built-in functions".to_string())
        }
        TemplateErrorKind::Syntax => {
            Some("check that every `{% if %}` and `{% for %}` block is closed".to_string())
        }
        _ => None,
    }
}

/// Name of the unknown filter, from a `filter <name> is unknown` detail
fn unknown_filter_name(err: &minijinja::Error) -> Option<&str> {
    let detail = err.detail()?;
    if let Some(quoted) = quoted_name(detail) {
        return Some(quoted);
    }

    let mut words = detail.split_whitespace();
    words.find(|w| *w == "filter")?;
    words.next()
}

fn quoted_name(text: &str) -> Option<&str> {
    let start = text.find(['`', '\''])? + 1;
    let end = start + text[start..].find(['`', '\''])?;
    Some(&text[start..end])
}

/// Help text naming the closest known filter, or all of them
pub fn suggest_filter(name: &str) -> String {
    let closest = AVAILABLE_FILTERS
        .iter()
        .map(|f| (*f, strsim::jaro_winkler(name, f)))
        .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.1.total_cmp(&b.1));

    match closest {
        Some((filter, _)) => format!("did you mean `{}`?", filter),
        None => format!(
            "unknown filter `{}`, available filters: {}",
            name,
            AVAILABLE_FILTERS.join(", ")
        ),
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_span() {
        let source = "= {{ template }}\n{{ objects.Service }}\n";

        let span = line_span(source, 2).unwrap();
        assert_eq!(span.offset(), 17);
        assert_eq!(span.len(), 21);

        assert_eq!(line_span(source, 1).unwrap().offset(), 0);
        assert!(line_span(source, 0).is_none());
        assert!(line_span(source, 5).is_none());
    }

    #[test]
    fn test_suggest_filter() {
        assert_eq!(suggest_filter("uper"), "did you mean `upper`?");
        assert!(suggest_filter("toyaml").starts_with("unknown filter `toyaml`"));
    }

    #[test]
    fn test_quoted_name() {
        assert_eq!(quoted_name("unknown filter `uper`"), Some("uper"));
        assert_eq!(quoted_name("no quotes here"), None);
    }

    #[test]
    fn test_kind_mapping() {
        assert_eq!(
            TemplateErrorKind::from(minijinja::ErrorKind::SyntaxError),
            TemplateErrorKind::Syntax
        );
        assert_eq!(
            TemplateErrorKind::from(minijinja::ErrorKind::NonKey),
            TemplateErrorKind::Type
        );
        assert_eq!(
            TemplateErrorKind::from(minijinja::ErrorKind::UndefinedError),
            TemplateErrorKind::Render
        );
    }

    #[test]
    fn test_from_minijinja_syntax_error() {
        let mut env = minijinja::Environment::new();
        let source = "= {{ template }}\n{% if objects %}\nunclosed\n";
        let err = env.add_template("page", source).unwrap_err();

        let err = TemplateError::from_minijinja(err, "page", source);
        assert_eq!(err.kind, TemplateErrorKind::Syntax);
        assert!(err.suggestion.unwrap().contains("closed"));
    }
}
