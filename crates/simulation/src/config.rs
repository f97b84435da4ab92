// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Simulation configuration loaded from TOML files or constructed programmatically.
//!
//! # TOML Format
//! ```toml
//! total_supply = [10, 5, 7]
//! customers = 5
//! rounds = 3
//! seed = 42
//! strategy = "random"
//! max_work_ms = 2000
//! retry_delay_ms = 1000
//! # Optional explicit claims; randomised from the seed when absent.
//! maximum = [[7, 5, 3], [3, 2, 2], [9, 0, 2], [2, 2, 2], [4, 3, 3]]
//! ```

use crate::demand::greedy::GreedyDemand;
use crate::demand::random::RandomDemand;
use crate::{DemandStrategy, SimulationError};
use resource_ledger::ResourceVector;
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Configuration for one simulation run.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SimulationConfig {
    /// Total units of each resource type.
    #[serde(default)]
    pub total_supply: Vec<u32>,
    /// Number of concurrent customers.
    #[serde(default = "default_customers")]
    pub customers: usize,
    /// Request attempts per customer.
    #[serde(default = "default_rounds")]
    pub rounds: usize,
    /// Seed for claims, demand and work durations; derived from the clock when absent.
    pub seed: Option<u64>,
    /// Demand strategy name: `"random"` or `"greedy"`.
    #[serde(default = "default_strategy")]
    pub strategy: String,
    /// Upper bound of the simulated work after a grant, in milliseconds.
    #[serde(default = "default_max_work_ms")]
    pub max_work_ms: u64,
    /// Pause after a denied request, in milliseconds.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
    /// Explicit maximum claims, one row per customer.
    pub maximum: Option<Vec<Vec<u32>>>,
}

fn default_customers() -> usize {
    5
}

fn default_rounds() -> usize {
    1
}

fn default_strategy() -> String {
    "random".to_string()
}

fn default_max_work_ms() -> u64 {
    2000
}

fn default_retry_delay_ms() -> u64 {
    1000
}

impl SimulationConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, SimulationError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SimulationError::Config(format!("cannot read config '{}': {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, SimulationError> {
        toml::from_str(toml_str)
            .map_err(|e| SimulationError::Config(format!("TOML parse error: {e}")))
    }

    /// Serialises configuration to TOML.
    pub fn to_toml(&self) -> Result<String, SimulationError> {
        toml::to_string_pretty(self)
            .map_err(|e| SimulationError::Config(format!("TOML serialise error: {e}")))
    }

    /// Checks the settings that do not depend on the ledger.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.total_supply.is_empty() {
            return Err(SimulationError::Config(
                "total_supply must list at least one resource type".into(),
            ));
        }
        if self.customers == 0 {
            return Err(SimulationError::Config("customers must be at least 1".into()));
        }
        if let Some(maximum) = &self.maximum {
            if maximum.len() != self.customers {
                return Err(SimulationError::Config(format!(
                    "maximum has {} rows but there are {} customers",
                    maximum.len(),
                    self.customers
                )));
            }
        }
        // Surfaces an unknown strategy before any task is spawned.
        self.create_strategy(0, 0).map(|_| ())
    }

    /// Total supply as a [`ResourceVector`].
    pub fn supply(&self) -> ResourceVector {
        ResourceVector::new(self.total_supply.clone())
    }

    /// Explicit claims, if configured.
    pub fn claims(&self) -> Option<Vec<ResourceVector>> {
        self.maximum
            .as_ref()
            .map(|rows| rows.iter().cloned().map(ResourceVector::new).collect())
    }

    /// Resolves the seed: the configured one, or one derived from the clock.
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        })
    }

    pub fn max_work(&self) -> Duration {
        Duration::from_millis(self.max_work_ms)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    /// Creates the demand strategy for one customer.
    pub fn create_strategy(
        &self,
        customer: usize,
        seed: u64,
    ) -> Result<Box<dyn DemandStrategy>, SimulationError> {
        match self.strategy.to_lowercase().as_str() {
            "random" => Ok(Box::new(RandomDemand::new(customer_seed(seed, customer, 0)))),
            "greedy" | "full-need" => Ok(Box::new(GreedyDemand::new())),
            other => Err(SimulationError::Config(format!(
                "unknown strategy '{other}'; expected 'random' or 'greedy'"
            ))),
        }
    }
}

/// Derives an independent per-customer seed for one purpose (`stream`).
pub(crate) fn customer_seed(seed: u64, customer: usize, stream: u64) -> u64 {
    seed.wrapping_mul(0x9E37_79B9_7F4A_7C15)
        .wrapping_add((customer as u64) << 8)
        .wrapping_add(stream)
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            total_supply: vec![10, 5, 7],
            customers: default_customers(),
            rounds: default_rounds(),
            seed: None,
            strategy: default_strategy(),
            max_work_ms: default_max_work_ms(),
            retry_delay_ms: default_retry_delay_ms(),
            maximum: None,
        }
    }
}
