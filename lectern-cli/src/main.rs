//! lectern command-line interface

use clap::Parser;
use lectern_cli::commands::Commands;

/// Entity extraction and IIIF image delivery toolkit
#[derive(Debug, Parser)]
#[command(name = "lectern", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Entities(args) => args.execute(),
        Commands::Manifest(args) => args.execute(),
        Commands::Crop(args) => args.execute(),
        Commands::GenerateConfig(args) => args.execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
