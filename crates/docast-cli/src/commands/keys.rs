//! `docast keys`: list the properties of an object with their ranges.

use super::{FormatArg, parse_file};
use anyhow::{Result, bail};
use docast::ast::AstNode;
use docast::{DocumentCursor, DocumentNode, NodeContext};
use std::path::PathBuf;

/// Arguments for the keys command
#[derive(Debug)]
pub struct KeysArgs {
    pub file: PathBuf,
    /// Dotted path from the root; numeric segments index into arrays
    pub path: Option<String>,
    pub format: FormatArg,
}

/// One line per key: name, encoded key range, encoded property range.
pub fn execute(args: &KeysArgs) -> Result<String> {
    let root = parse_file(&args.file, args.format, 0)?;
    let doc = DocumentCursor::from_root(&root);

    let path = args.path.as_deref().unwrap_or("");
    let target = resolve_path(doc, path)?;
    if !target.node().is_object() {
        bail!(
            "`{}` is {}, not an Object",
            display_path(path),
            target.node().node_type()
        );
    }

    let lines: Vec<String> = target
        .keys()
        .into_iter()
        .map(|key| {
            format!(
                "{}\t{}\t{}",
                key,
                target.key_range(key).unwrap_or_default(),
                target.prop_range(key).unwrap_or_default()
            )
        })
        .collect();
    Ok(lines.join("\n"))
}

fn resolve_path<'a>(doc: DocumentCursor<'a>, path: &str) -> Result<DocumentCursor<'a>> {
    let mut current = doc;
    for segment in path.split('.').filter(|s| !s.is_empty()) {
        current = match step(current, segment) {
            Some(next) => next,
            None => bail!("No value at `{}` (stopped at `{}`)", display_path(path), segment),
        };
    }
    Ok(current)
}

fn step<'a>(current: DocumentCursor<'a>, segment: &str) -> Option<DocumentCursor<'a>> {
    if let Some(array) = current.node().as_array() {
        let index: usize = segment.parse().ok()?;
        let element = array.children().get(index)?;
        return Some(DocumentCursor::new(
            element.as_node(),
            NodeContext {
                root: Some(current.root_node()),
                parent_key: None,
            },
        ));
    }
    current.get_child(segment)
}

fn display_path(path: &str) -> &str {
    if path.is_empty() { "<root>" } else { path }
}
