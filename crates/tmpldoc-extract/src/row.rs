//! Table rows and their AsciiDoc markup
//!
//! Every extractor emits blocks into an [`ExtractedTable`]; the markup for
//! those blocks, including the monospace heuristic applied to each cell, is
//! produced here and nowhere else.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::borrow::Cow;

use crate::extractors::Category;

/// Marker rendered in a cell when no value is known
pub const PLACEHOLDER: &str = "--";

/// Cell separator within a row
pub const CELL_SEPARATOR: &str = " | ";

/// Environment-variable-like tokens (`APPLICATION_NAME`, `${EAP_RELEASE}`, `8080`)
static TOKEN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z0-9_${}:-]+$").expect("valid regex"));

/// Wrap a cell in monospace markup if it looks like code
///
/// Paths and URLs (leading `$` or `/`), templated references (trailing `}`)
/// and environment-variable tokens are wrapped in backticks. The placeholder
/// and the empty string are left alone.
pub fn fix_width(text: &str) -> Cow<'_, str> {
    if text.is_empty() || text == PLACEHOLDER {
        return Cow::Borrowed(text);
    }

    if text.starts_with(['$', '/']) || text.ends_with('}') || TOKEN_PATTERN.is_match(text) {
        return Cow::Owned(format!("`{}`", text));
    }

    Cow::Borrowed(text)
}

/// Render one table row: `\n|cell | cell | cell`
pub fn build_row<S: AsRef<str>>(cells: &[S]) -> String {
    let cells: Vec<Cow<'_, str>> = cells.iter().map(|c| fix_width(c.as_ref())).collect();
    format!("\n|{}", cells.join(CELL_SEPARATOR))
}

/// One unit of extracted content
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Block {
    /// A table row of display values
    Row { cells: Vec<String> },

    /// A leading cell spanning the `span` rows that follow
    Group { span: usize, label: String },

    /// A titled literal block
    Listing { title: String, body: String },
}

impl Block {
    /// AsciiDoc markup for this block
    pub fn render(&self) -> String {
        match self {
            Self::Row { cells } => build_row(cells),
            Self::Group { span, label } => format!("\n.{}+| `{}`", span, label),
            Self::Listing { title, body } => format!("\n.{}\n----\n{}\n----\n", title, body),
        }
    }
}

/// The blocks extracted for one category of one descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedTable {
    pub category: Category,
    pub blocks: Vec<Block>,
}

impl ExtractedTable {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            blocks: Vec::new(),
        }
    }

    /// Append a row of display values
    pub fn push_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.blocks.push(Block::Row {
            cells: cells.into_iter().map(Into::into).collect(),
        });
    }

    /// Append a group header spanning the next `span` rows
    pub fn push_group(&mut self, span: usize, label: impl Into<String>) {
        self.blocks.push(Block::Group {
            span,
            label: label.into(),
        });
    }

    /// Append a titled literal block
    pub fn push_listing(&mut self, title: impl Into<String>, body: impl Into<String>) {
        self.blocks.push(Block::Listing {
            title: title.into(),
            body: body.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// The cells of every row, in order
    pub fn rows(&self) -> impl Iterator<Item = &[String]> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Row { cells } => Some(cells.as_slice()),
            _ => None,
        })
    }

    /// AsciiDoc markup for the whole table
    pub fn render(&self) -> String {
        self.blocks.iter().map(Block::render).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fix_width_placeholder_and_empty() {
        assert_eq!(fix_width(PLACEHOLDER), "--");
        assert_eq!(fix_width(""), "");
    }

    #[test]
    fn test_fix_width_tokens() {
        let cases = [
            "APPLICATION_NAME",
            "${EAP_RELEASE}",
            "HTTPS_KEYSTORE",
            "8080",
            "TCP",
            "MQ_QUEUES",
        ];
        for case in cases {
            assert_eq!(fix_width(case), format!("`{}`", case), "case {}", case);
        }
    }

    #[test]
    fn test_fix_width_paths_and_references() {
        assert_eq!(fix_width("/etc/eap-secret-volume"), "`/etc/eap-secret-volume`");
        assert_eq!(fix_width("$HOME"), "`$HOME`");
        assert_eq!(fix_width("eap-app:${EAP_RELEASE}"), "`eap-app:${EAP_RELEASE}`");
    }

    #[test]
    fn test_fix_width_prose_untouched() {
        assert_eq!(fix_width("The web server's http port."), "The web server's http port.");
        assert_eq!(fix_width("eap-app"), "eap-app");
        assert_eq!(fix_width("Application_Name"), "Application_Name");
        assert_eq!(fix_width("ssl certs"), "ssl certs");
    }

    #[test]
    fn test_build_row() {
        assert_eq!(
            build_row(&["eap-app", "8080", "The web server's http port."]),
            "\n|eap-app | `8080` | The web server's http port."
        );
        assert_eq!(build_row(&["--", ""]), "\n|-- | ");
    }

    #[test]
    fn test_group_and_listing_markup() {
        let mut table = ExtractedTable::new(Category::ContainerPorts);
        table.push_group(2, "eap-app");
        table.push_row(["jolokia", "8778", "TCP"]);
        table.push_row(["http", "8080", "TCP"]);

        assert_eq!(
            table.render(),
            "\n.2+| `eap-app`\n|jolokia | `8778` | `TCP`\n|http | `8080` | `TCP`"
        );
        assert_eq!(table.rows().count(), 2);

        let mut probes = ExtractedTable::new(Category::ReadinessProbe);
        probes.push_listing("eap-app", "/bin/bash -c /opt/eap/bin/readinessProbe.sh");
        assert_eq!(
            probes.render(),
            "\n.eap-app\n----\n/bin/bash -c /opt/eap/bin/readinessProbe.sh\n----\n"
        );
    }

    #[test]
    fn test_empty_table_renders_nothing() {
        let table = ExtractedTable::new(Category::Service);
        assert!(table.is_empty());
        assert_eq!(table.render(), "");
    }
}
