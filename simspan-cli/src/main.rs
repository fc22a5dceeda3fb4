//! simspan command-line entry point

use clap::Parser;
use simspan_cli::commands::Commands;

/// Propagate annotated spans to identical unannotated text
#[derive(Debug, Parser)]
#[command(name = "simspan", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Propagate(args) => args.execute(),
        Commands::Types(args) => args.execute(),
    }
}
