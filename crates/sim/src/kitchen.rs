// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Banquet Contributors

//! Kitchen simulation: run the crew for a while, then report dish counts

use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use anyhow::{Context, Result};
use banquet_core::{Kitchen, KitchenConfig, StdoutSink, UniformJitter};
use clap::Args;

#[derive(Args)]
pub struct KitchenArgs {
    /// TOML kitchen config; defaults to the built-in sample roster
    #[arg(long)]
    config: Option<PathBuf>,

    /// How long to let the crew cook (e.g. "10s", "500ms")
    #[arg(long, default_value = "10s", value_parser = humantime::parse_duration)]
    duration: Duration,
}

pub fn run(args: KitchenArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            KitchenConfig::from_toml_str(&text)?
        }
        None => KitchenConfig::sample(),
    };

    let mut kitchen = Kitchen::new(config, StdoutSink, UniformJitter)?;
    kitchen.start()?;

    // Let the crew cook for the requested duration, or until Ctrl-C.
    let (tx, rx) = mpsc::channel();
    ctrlc::set_handler(move || {
        let _ = tx.send(());
    })?;
    match rx.recv_timeout(args.duration) {
        Ok(()) => tracing::info!("interrupted, stopping crew"),
        Err(mpsc::RecvTimeoutError::Timeout) => {}
        Err(mpsc::RecvTimeoutError::Disconnected) => {}
    }

    kitchen.stop();

    let counts = kitchen.dish_counts();
    let mut names: Vec<_> = counts.keys().cloned().collect();
    names.sort();
    let mut total = 0;
    for name in &names {
        let count = counts.get(name).copied().unwrap_or(0);
        println!("{name} cooked {count} dishes");
        total += count;
    }
    println!("Total dishes cooked: {total}");
    Ok(())
}
