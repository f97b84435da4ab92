// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Simulation results.
//!
//! [`SimulationReport`] collects per-customer outcome counts together with
//! the allocator's own statistics and the final ledger, for CLI output and
//! for asserting on runs in tests.

use allocator::{AllocationStats, DenialReason};
use resource_ledger::Ledger;
use std::time::Duration;

/// Outcome counts for one customer.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct CustomerReport {
    /// Customer index.
    pub customer: usize,
    /// Requests sent to the banker.
    pub attempts: u64,
    /// Requests granted.
    pub granted: u64,
    /// Denied: more than the remaining need.
    pub denied_exceeds_need: u64,
    /// Denied: more than was free.
    pub denied_exceeds_available: u64,
    /// Denied: granting would have been unsafe.
    pub denied_unsafe: u64,
    /// Holds released after simulated work.
    pub released: u64,
    /// Rounds where the strategy asked for nothing.
    pub skipped: u64,
}

impl CustomerReport {
    pub fn new(customer: usize) -> Self {
        Self {
            customer,
            ..Default::default()
        }
    }

    pub fn denied(&self) -> u64 {
        self.denied_exceeds_need + self.denied_exceeds_available + self.denied_unsafe
    }

    pub(crate) fn record_denial(&mut self, reason: &DenialReason) {
        match reason {
            DenialReason::ExceedsNeed { .. } => self.denied_exceeds_need += 1,
            DenialReason::ExceedsAvailable { .. } => self.denied_exceeds_available += 1,
            DenialReason::UnsafeState => self.denied_unsafe += 1,
        }
    }
}

/// Aggregate results of a complete simulation run.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SimulationReport {
    /// Seed the run was driven by.
    pub seed: u64,
    /// Demand strategy of customer 0 (all customers share one in config-driven runs).
    pub strategy: String,
    /// Wall-clock time of the run.
    pub total_duration: Duration,
    /// Per-customer outcomes, in customer order.
    pub customers: Vec<CustomerReport>,
    /// Allocator statistics at the end of the run.
    pub stats: AllocationStats,
    /// Ledger state at the end of the run.
    pub final_state: Ledger,
}

impl SimulationReport {
    pub fn total_attempts(&self) -> u64 {
        self.customers.iter().map(|c| c.attempts).sum()
    }

    pub fn total_granted(&self) -> u64 {
        self.customers.iter().map(|c| c.granted).sum()
    }

    pub fn total_denied(&self) -> u64 {
        self.customers.iter().map(CustomerReport::denied).sum()
    }

    /// Returns `true` if every granted unit has been returned.
    pub fn fully_released(&self) -> bool {
        self.final_state.allocated_units() == 0
    }

    /// Returns a human-readable summary suitable for CLI output.
    pub fn summary(&self) -> String {
        format!(
            "Simulation: {:.2}ms total, {} customers, strategy '{}', seed {}, \
             {} requests ({} granted, {} denied), {} units still held",
            self.total_duration.as_secs_f64() * 1000.0,
            self.customers.len(),
            self.strategy,
            self.seed,
            self.total_attempts(),
            self.total_granted(),
            self.total_denied(),
            self.final_state.allocated_units(),
        )
    }
}
