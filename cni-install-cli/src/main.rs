//! cni-install: installs CNI binaries onto a node's filesystem.
//!
//! # Usage
//!
//! ```text
//! cni-install binaries [--config FILE] [--source DIR] [--target DIR]...
//!                      [--update | --no-update] [--skip NAME]... [--prefix P]
//! cni-install config   [--config FILE] [overrides...] [--json]
//! ```
//!
//! Settings resolve as defaults < config file < environment < flags.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{binaries::BinariesArgs, config::ConfigArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "cni-install",
    version,
    about = "Install CNI plugin binaries into host directories",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Copy binaries from the source directory into every writable target directory.
    Binaries(BinariesArgs),

    /// Print the resolved installer configuration.
    Config(ConfigArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Commands::Binaries(args) => args.run(),
        Commands::Config(args) => args.run(),
    }
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
