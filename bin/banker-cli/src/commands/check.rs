// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `banker check` command: safety verdict for a recorded state.

use resource_ledger::{Ledger, LedgerState};
use std::path::{Path, PathBuf};

pub fn execute(path: PathBuf, json: bool) -> anyhow::Result<()> {
    let ledger = load_state(&path)?;
    let report = safety_checker::check_ledger(&ledger);

    if json {
        let output = serde_json::json!({
            "state": LedgerState::from(&ledger),
            "need": ledger.needs(),
            "report": report,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("╔══════════════════════════════════════════════════════╗");
        println!("║          banker · Safety Check                      ║");
        println!("╚══════════════════════════════════════════════════════╝");
        println!();
        println!("  State:  {}", path.display());
        println!("  Supply: {}", ledger.total_supply());
        println!();
        print_matrices(&ledger);
        println!();
        println!("  {}", report.summary());
    }

    tracing::debug!("{}", report.summary());
    if !report.is_safe() {
        anyhow::bail!(
            "state is unsafe: customers {:?} cannot finish",
            report.blocked()
        );
    }
    Ok(())
}

/// Reads and validates a [`LedgerState`] TOML file.
pub fn load_state(path: &Path) -> anyhow::Result<Ledger> {
    tracing::info!("loading state from {}", path.display());
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("cannot read state '{}': {e}", path.display()))?;
    let state: LedgerState = toml::from_str(&content)?;
    Ok(state.into_ledger()?)
}

fn print_matrices(ledger: &Ledger) {
    println!("  {:<8} {:<16} {:<16} {:<16}", "Customer", "Maximum", "Allocation", "Need");
    for i in 0..ledger.num_customers() {
        println!(
            "  C{:<7} {:<16} {:<16} {:<16}",
            i,
            ledger.maximum(i).to_string(),
            ledger.allocation(i).to_string(),
            ledger.need(i).to_string(),
        );
    }
    println!("  {:<8} {}", "Free", ledger.available());
}
