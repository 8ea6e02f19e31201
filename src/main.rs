use clap::Parser;
use miette::Result;
use pxscan::cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan(args) => pxscan::cli::scan::run(args)?,
    }

    Ok(())
}
