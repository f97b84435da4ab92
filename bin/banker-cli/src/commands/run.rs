// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `banker run` command: simulate concurrent customers.
//!
//! Settings come from `--config` when given, then explicit arguments
//! override individual fields.

use resource_ledger::ResourceVector;
use simulation::{Simulation, SimulationConfig, SimulationReport};
use std::path::PathBuf;

/// Settings given explicitly on the command line.
#[derive(Debug, Default)]
pub struct Overrides {
    pub resources: Vec<String>,
    pub customers: Option<usize>,
    pub rounds: Option<usize>,
    pub seed: Option<u64>,
    pub strategy: Option<String>,
    pub max_work_ms: Option<u64>,
    pub retry_delay_ms: Option<u64>,
}

impl Overrides {
    fn apply(self, config: &mut SimulationConfig) -> anyhow::Result<()> {
        if !self.resources.is_empty() {
            let supply = ResourceVector::parse_args(self.resources.as_slice())?;
            config.total_supply = supply.as_slice().to_vec();
        }
        if let Some(customers) = self.customers {
            config.customers = customers;
        }
        if let Some(rounds) = self.rounds {
            config.rounds = rounds;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(strategy) = self.strategy {
            config.strategy = strategy;
        }
        if let Some(ms) = self.max_work_ms {
            config.max_work_ms = ms;
        }
        if let Some(ms) = self.retry_delay_ms {
            config.retry_delay_ms = ms;
        }
        Ok(())
    }
}

pub async fn execute(
    config_path: Option<PathBuf>,
    overrides: Overrides,
    json: bool,
) -> anyhow::Result<()> {
    let mut config = match &config_path {
        Some(path) => {
            tracing::info!("loading config from {}", path.display());
            SimulationConfig::from_file(path)?
        }
        None => {
            if overrides.resources.is_empty() {
                anyhow::bail!("no resource counts given; pass them as arguments or via --config");
            }
            SimulationConfig::default()
        }
    };
    overrides.apply(&mut config)?;

    let simulation = Simulation::new(config.clone())?;
    tracing::info!(
        "running {} customers for {} rounds with seed {}",
        config.customers,
        config.rounds,
        simulation.seed()
    );

    if !json {
        println!("╔══════════════════════════════════════════════════════╗");
        println!("║          banker · Customer Simulation               ║");
        println!("╚══════════════════════════════════════════════════════╝");
        println!();
        println!("  Config:");
        if let Some(path) = &config_path {
            println!("   File:        {}", path.display());
        }
        println!("   Supply:      {}", config.supply());
        println!("   Customers:   {}", config.customers);
        println!("   Rounds:      {}", config.rounds);
        println!("   Strategy:    {}", config.strategy);
        println!("   Seed:        {}", simulation.seed());
        println!("   Max work:    {} ms", config.max_work_ms);
        println!("   Retry delay: {} ms", config.retry_delay_ms);
        println!();
        println!("  Claims:");
        let ledger = simulation.banker().snapshot();
        for (i, claim) in ledger.maximums().iter().enumerate() {
            println!("   C{i:<3} {claim}");
        }
        println!();
        println!("  Running...");
        println!();
    }

    let report = simulation.run().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &SimulationReport) {
    println!();
    println!("  Results:");
    println!(
        "   {:<8} {:>8} {:>8} {:>10} {:>10} {:>8} {:>8} {:>8}",
        "Customer", "Attempts", "Granted", "Over need", "Over avail", "Unsafe", "Released", "Skipped"
    );
    println!("   {}", "─".repeat(76));
    for c in &report.customers {
        println!(
            "   C{:<7} {:>8} {:>8} {:>10} {:>10} {:>8} {:>8} {:>8}",
            c.customer,
            c.attempts,
            c.granted,
            c.denied_exceeds_need,
            c.denied_exceeds_available,
            c.denied_unsafe,
            c.released,
            c.skipped,
        );
    }
    println!();
    println!("   Final available: {}", report.final_state.available());
    if report.fully_released() {
        println!("   All units returned.");
    } else {
        println!(
            "   WARNING: {} units still held",
            report.final_state.allocated_units()
        );
    }
    println!();
    println!("{}", report.stats.summary());
    println!("{}", report.summary());
}
