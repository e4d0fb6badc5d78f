//! cosmic-esbuild binary

use clap::Parser;
use colored::Colorize;
use cosmic_bundler::EsbuildCli;
use cosmic_cli::{Cli, CosmicEsbuild, Result, logging};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.debug) {
        eprintln!("{}: {}", "error".red().bold(), e);
    }

    if let Err(e) = run(cli).await {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let cwd = dunce::canonicalize(std::env::current_dir()?)?;
    let bundler = EsbuildCli::discover(&cwd);
    tracing::debug!(binary = ?bundler.binary(), "Using esbuild");

    CosmicEsbuild::new(cli, cwd, bundler).run().await
}
