//! Command implementations for the docast CLI
//!
//! Each command returns its output as a string; `main` prints it.

pub mod dump;
pub mod keys;
pub mod locate;

use anyhow::{Context, Result};
use clap::ValueEnum;
use docast::Format;
use docast::ast::RootNode;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Input format as chosen on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Auto,
    Json,
    Yaml,
}

impl FormatArg {
    fn resolve(self, text: &str) -> Format {
        match self {
            FormatArg::Auto => docast::detect_format(text),
            FormatArg::Json => Format::Json,
            FormatArg::Yaml => Format::Yaml,
        }
    }
}

pub(crate) fn read_source(path: &Path) -> Result<String> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    debug!(path = %path.display(), chars = text.chars().count(), "read source");
    Ok(text)
}

pub(crate) fn parse_file(path: &Path, format: FormatArg, document_index: usize) -> Result<RootNode> {
    let text = read_source(path)?;
    let format = format.resolve(&text);
    docast::parse_as(format, document_index, &text)
        .with_context(|| format!("Failed to parse {} as {}", path.display(), format))
}
