// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # banker
//!
//! Command-line interface for the Banker's Algorithm allocator.
//!
//! ## Usage
//! ```bash
//! # Simulate five customers competing for 10, 5 and 7 units
//! banker run 10 5 7 --customers 5 --rounds 3 --seed 42
//!
//! # Same, with every setting taken from a file
//! banker --config demos/simulation.toml run
//!
//! # Check whether a recorded state is safe
//! banker check demos/textbook.toml
//! ```

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "banker",
    about = "Deadlock-avoiding resource allocation with the Banker's Algorithm",
    version,
    author
)]
struct Cli {
    /// Path to a TOML simulation config (explicit CLI arguments override it).
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,

    /// Enable verbose logging (repeat for more: -v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run concurrent customers against one banker.
    Run {
        /// Total units of each resource type (e.g. "10 5 7" or "10,5,7").
        resources: Vec<String>,

        /// Number of customers.
        #[arg(short = 'n', long)]
        customers: Option<usize>,

        /// Request attempts per customer.
        #[arg(short, long)]
        rounds: Option<usize>,

        /// Seed for claims, demand and work times.
        #[arg(long)]
        seed: Option<u64>,

        /// Demand strategy: random, greedy.
        #[arg(short, long)]
        strategy: Option<String>,

        /// Upper bound of simulated work after a grant, in milliseconds.
        #[arg(long)]
        max_work_ms: Option<u64>,

        /// Pause after a denied request, in milliseconds.
        #[arg(long)]
        retry_delay_ms: Option<u64>,

        /// Print the report as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Check whether a recorded ledger state is safe.
    Check {
        /// TOML file with `available`, `maximum` and `allocation`.
        state: std::path::PathBuf,

        /// Print the verdict as JSON.
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    commands::init_tracing(cli.verbose);

    match cli.command {
        Commands::Run {
            resources,
            customers,
            rounds,
            seed,
            strategy,
            max_work_ms,
            retry_delay_ms,
            json,
        } => {
            let overrides = commands::run::Overrides {
                resources,
                customers,
                rounds,
                seed,
                strategy,
                max_work_ms,
                retry_delay_ms,
            };
            commands::run::execute(cli.config, overrides, json).await
        }
        Commands::Check { state, json } => commands::check::execute(state, json),
    }
}
