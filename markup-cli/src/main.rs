use clap::{Parser, Subcommand};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

mod error;
mod subcommands;

/// Converts plain-text markup documents to XHTML
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert documents to XHTML
    Convert(subcommands::convert::Args),

    /// Print the node tree of a document
    Inspect(subcommands::inspect::Args),
}

fn main() -> miette::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // Logs go to stderr: stdout may carry the converted document.
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    match &args.command {
        Command::Convert(args) => subcommands::convert::run(args),
        Command::Inspect(args) => subcommands::inspect::run(args),
    }
}
