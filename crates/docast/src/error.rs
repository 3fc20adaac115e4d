//! Error types for parsing and navigating documents.

use crate::ast::NodeType;
use crate::parse::Format;
use docast_source_map::{LocateError, Position};
use thiserror::Error;

/// Result type alias for docast operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building or navigating a document tree.
///
/// Every variant is fatal for the call that produced it; no partial tree is
/// ever returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The underlying grammar rejected the text
    #[error("{format} syntax error: {message}{}", location_suffix(.location))]
    Syntax {
        format: Format,
        message: String,
        location: Option<Position>,
    },

    /// The text holds no value at all
    #[error("Empty {format} document")]
    EmptyDocument { format: Format },

    /// A native node kind with no AST counterpart
    #[error("Unsupported {format} node: {kind}{}", location_suffix(.location))]
    UnsupportedNode {
        format: Format,
        kind: String,
        location: Option<Position>,
    },

    /// A number token that fits neither an integer nor a float
    #[error("Invalid number literal `{raw}`{}", location_suffix(.location))]
    InvalidNumber {
        raw: String,
        location: Option<Position>,
    },

    /// A native offset the locator could not resolve
    #[error(transparent)]
    Locate(#[from] LocateError),

    /// A literal accessor used on a node that holds no scalar
    #[error("Cannot read a literal from node of type {found}")]
    NotALiteral { found: NodeType },

    /// A literal whose scalar kind differs from the requested type
    #[error("Expected a {expected} literal but found {found}")]
    LiteralTypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
}

fn location_suffix(location: &Option<Position>) -> String {
    location
        .map(|pos| format!(" at line {}, column {}", pos.line, pos.column))
        .unwrap_or_default()
}
