// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Banquet Contributors

//! Hall demo: party threads reserving and releasing contiguous space

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use banquet_core::Hall;
use clap::Args;
use rand::Rng;

#[derive(Args)]
pub struct HallArgs {
    /// Number of slots in the hall
    #[arg(long, default_value_t = 20)]
    capacity: usize,

    /// Number of concurrent parties
    #[arg(long, default_value_t = 5)]
    parties: usize,

    /// Reservations each party makes
    #[arg(long, default_value_t = 4)]
    rounds: usize,
}

pub fn run(args: HallArgs) -> Result<()> {
    let hall = Arc::new(Hall::new(args.capacity)?);
    // Cap widths so the parties contend without wedging the demo.
    let max_width = (args.capacity / args.parties.max(1)).max(1);

    let mut handles = Vec::new();
    for party in 0..args.parties {
        let hall = Arc::clone(&hall);
        let name = party_name(party);
        let handle = thread::Builder::new()
            .name(name.clone())
            .spawn(move || party_loop(&hall, &name, max_width, args.rounds))?;
        handles.push(handle);
    }
    for handle in handles {
        if handle.join().is_err() {
            tracing::warn!("party thread panicked");
        }
    }

    println!("final layout: {}", hall.layout());
    Ok(())
}

fn party_name(party: usize) -> String {
    let letter = char::from(b'a' + (party % 26) as u8);
    format!("{letter}{party}")
}

fn party_loop(hall: &Hall, name: &str, max_width: usize, rounds: usize) {
    let mut rng = rand::thread_rng();
    for _ in 0..rounds {
        let width = rng.gen_range(1..=max_width);
        let Ok(start) = hall.allocate(name, width) else {
            return;
        };
        thread::sleep(Duration::from_millis(rng.gen_range(5..=20)));
        hall.free(name, start, width);
    }
}
