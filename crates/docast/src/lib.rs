//! # docast
//!
//! A format-agnostic AST for JSON and YAML configuration documents.
//!
//! Both formats parse into the same tree of Object, Array, Literal, Property
//! and Identifier nodes. Every node records the document it came from and a
//! [`Range`] whose endpoints carry a character offset plus 1-based line and
//! column, so diagnostics can point back into the source text.
//!
//! ## Design
//!
//! Trees are built eagerly and owned by the caller. The typed overlay in
//! [`document`] borrows into a tree, so wrapping the same node twice yields
//! two views of identical data and the tree itself is never copied.
//!
//! ## Example
//!
//! ```rust
//! use docast::{DocumentCursor, DocumentNode};
//!
//! let content = r#"
//! title: My Document
//! tags: [a, b]
//! "#;
//!
//! let root = docast::parse(0, content).unwrap();
//! let doc = DocumentCursor::from_root(&root);
//! assert_eq!(doc.keys(), vec!["title", "tags"]);
//!
//! let title = doc.get_literal::<String>("title").unwrap();
//! assert_eq!(title.value().unwrap(), "My Document");
//! assert_eq!(title.loc().start.line, 2);
//! ```

pub mod ast;
pub mod document;
mod error;
pub mod json;
mod parse;
pub mod yaml;

pub use document::{DocumentCursor, DocumentNode, LiteralNode, LiteralValue, NodeContext};
pub use docast_source_map::{Locator, Position, Range, encode_range};
pub use error::{Error, Result};
pub use parse::{Format, detect_format, parse, parse_as, parse_documents};
