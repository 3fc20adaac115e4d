//! docast CLI - inspect the AST of JSON and YAML documents

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::FormatArg;

#[derive(Parser)]
#[command(name = "docast")]
#[command(about = "Inspect the AST of JSON and YAML documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the AST of a document as JSON
    Dump {
        /// Document to parse
        file: PathBuf,

        /// Input format (auto picks JSON when the text opens with `{`)
        #[arg(long, value_enum, default_value_t = FormatArg::Auto)]
        format: FormatArg,

        /// Document index recorded on every node
        #[arg(long, default_value_t = 0)]
        document_index: usize,

        /// Print on a single line
        #[arg(long)]
        compact: bool,
    },

    /// List the keys of an object with their source ranges
    Keys {
        /// Document to parse
        file: PathBuf,

        /// Dotted path to the object (numeric segments index arrays)
        #[arg(long)]
        path: Option<String>,

        /// Input format
        #[arg(long, value_enum, default_value_t = FormatArg::Auto)]
        format: FormatArg,
    },

    /// Print the line and column of a character offset
    Locate {
        /// Source file
        file: PathBuf,

        /// Character offset from the start of the file
        offset: usize,
    },
}

fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docast=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let output = match cli.command {
        Commands::Dump {
            file,
            format,
            document_index,
            compact,
        } => commands::dump::execute(&commands::dump::DumpArgs {
            file,
            format,
            document_index,
            compact,
        })?,
        Commands::Keys { file, path, format } => {
            commands::keys::execute(&commands::keys::KeysArgs { file, path, format })?
        }
        Commands::Locate { file, offset } => {
            commands::locate::execute(&commands::locate::LocateArgs { file, offset })?
        }
    };
    println!("{}", output);
    Ok(())
}
