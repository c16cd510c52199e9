//! Development tasks for the loadout rules workspace
//!
//! This binary provides inspection utilities using the cargo-xtask pattern.
//! Run with: `cargo xtask <command>`

mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Check, Validate};

/// Development tasks for the loadout rules workspace
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Ruleset inspection tools", long_about = None)]
#[command(version)]
struct Cli {
    /// Log verbosity on stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Load a ruleset and print warnings, digest and effective settings
    Check(Check),

    /// Validate a single loadout against a ruleset
    Validate(Validate),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for RULES_* env vars)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => tracing::Level::ERROR,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Check(cmd) => cmd.execute(),
        Command::Validate(cmd) => cmd.execute(),
    }
}
