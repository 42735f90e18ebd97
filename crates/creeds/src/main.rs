//! Creeds CLI.
//!
//! Provides commands for:
//! - `convert`: Convert YAML sources into the JSON document store
//! - `build`: Render every stored document into a static site
//! - `list`: List stored documents by category

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BuildArgs, ConvertArgs, ListArgs};
use output::Output;

/// Creeds - confessional texts as a static site.
#[derive(Parser)]
#[command(name = "creeds", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert YAML sources into JSON records.
    Convert(ConvertArgs),
    /// Build the static site from JSON records.
    Build(BuildArgs),
    /// List stored documents.
    List(ListArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Convert(args) => args.verbose,
            Self::Build(args) => args.verbose,
            Self::List(_) => false,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.command.verbose() {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Convert(args) => args.execute(),
        Commands::Build(args) => args.execute(),
        Commands::List(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
