//! nextline command-line entry point

use clap::Parser;
use nextline_cli::commands::Commands;

/// Read files line by line with per-descriptor buffering
#[derive(Debug, Parser)]
#[command(name = "nextline", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.command.execute()
}
