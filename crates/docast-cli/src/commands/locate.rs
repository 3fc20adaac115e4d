//! `docast locate`: resolve a character offset to a line and column.

use super::read_source;
use anyhow::{Context, Result};
use docast_source_map::Locator;
use std::path::PathBuf;

/// Arguments for the locate command
#[derive(Debug)]
pub struct LocateArgs {
    pub file: PathBuf,
    pub offset: usize,
}

pub fn execute(args: &LocateArgs) -> Result<String> {
    let text = read_source(&args.file)?;
    let locator = Locator::new(&text);
    let position = locator
        .position(args.offset)
        .with_context(|| format!("Cannot locate offset in {}", args.file.display()))?;
    Ok(format!("line {}, column {}", position.line, position.column))
}
