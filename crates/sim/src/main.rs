// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Banquet Contributors

//! banquet-sim - drivers for the hall and kitchen simulations

mod hall;
mod kitchen;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "banquet-sim",
    version,
    about = "Banquet hall and kitchen coordination simulations"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the no-hold-and-wait kitchen crew
    Kitchen(kitchen::KitchenArgs),
    /// Run the contiguous-space hall demo
    Hall(hall::HallArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Kitchen(args) => kitchen::run(args),
        Commands::Hall(args) => hall::run(args),
    }
}
