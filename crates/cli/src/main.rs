// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! relay - exercise the relay event bus from the command line

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{config, stress};
use output::OutputFormat;

#[derive(Parser)]
#[command(
    name = "relay",
    version,
    about = "Relay - topic-based in-process event bus"
)]
struct Cli {
    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run concurrent publishers and listeners against one bus
    Stress(stress::StressArgs),
    /// Show the effective bus configuration
    Config(config::ConfigArgs),
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Stress(args) => stress::stress(args, cli.output),
        Commands::Config(args) => config::config(args, cli.output),
    }
}

/// Log to stderr, filtered by `RUST_LOG` (default: warn)
fn init_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
