//! Format detection and dispatch to the JSON or YAML adapter.

use crate::ast::{AstNode, RootNode};
use crate::error::Result;
use crate::{json, yaml};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The concrete syntax a document is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Json,
    Yaml,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Json => f.write_str("JSON"),
            Format::Yaml => f.write_str("YAML"),
        }
    }
}

/// Guess a document's format from its first non-whitespace character.
///
/// Text opening with `{` is JSON; anything else is YAML. Leading whitespace
/// and a byte order mark are skipped. A YAML document that starts with a flow
/// mapping is therefore read as JSON.
pub fn detect_format(text: &str) -> Format {
    let body = text.trim_start_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    if body.starts_with('{') {
        Format::Json
    } else {
        Format::Yaml
    }
}

/// Parse a document, choosing the adapter with [`detect_format`].
///
/// Every node in the returned tree carries `document_index`.
///
/// # Example
///
/// ```rust
/// use docast::ast::AstNode;
///
/// let root = docast::parse(0, "title: My Document").unwrap();
/// assert!(root.is_object());
/// assert_eq!(root.document_index(), 0);
/// ```
///
/// # Errors
///
/// Fails if the selected grammar rejects the text or the tree cannot be built.
pub fn parse(document_index: usize, text: &str) -> Result<RootNode> {
    parse_as(detect_format(text), document_index, text)
}

/// Parse a document with an explicit format, skipping detection.
pub fn parse_as(format: Format, document_index: usize, text: &str) -> Result<RootNode> {
    tracing::debug!(document_index, %format, "parsing document");
    let root = match format {
        Format::Json => json::parse(document_index, text)?,
        Format::Yaml => yaml::parse(document_index, text)?,
    };
    tracing::debug!(document_index, node_type = %root.node_type(), "parsed document");
    Ok(root)
}

/// Parse several documents, numbering them 0, 1, 2, … in order.
///
/// Stops at the first document that fails.
pub fn parse_documents<'t, I>(texts: I) -> Result<Vec<RootNode>>
where
    I: IntoIterator<Item = &'t str>,
{
    texts
        .into_iter()
        .enumerate()
        .map(|(document_index, text)| parse(document_index, text))
        .collect()
}
