//! `docast dump`: print a document's AST as JSON.

use super::{FormatArg, parse_file};
use anyhow::Result;
use std::path::PathBuf;

/// Arguments for the dump command
#[derive(Debug)]
pub struct DumpArgs {
    pub file: PathBuf,
    pub format: FormatArg,
    pub document_index: usize,
    /// Single-line output
    pub compact: bool,
}

pub fn execute(args: &DumpArgs) -> Result<String> {
    let root = parse_file(&args.file, args.format, args.document_index)?;
    let json = if args.compact {
        serde_json::to_string(&root)?
    } else {
        serde_json::to_string_pretty(&root)?
    };
    Ok(json)
}
