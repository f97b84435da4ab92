// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # simulation
//!
//! Drives a [`Banker`](allocator::Banker) with concurrent simulated
//! customers. Each customer is a tokio task that repeatedly asks for units,
//! works for a while when granted, and gives everything back.
//!
//! # Key Components
//!
//! - [`SimulationConfig`] — supply, customer count, rounds, seed and timing,
//!   loadable from TOML.
//! - [`DemandStrategy`] — what a customer asks for next: [`RandomDemand`],
//!   [`GreedyDemand`] or [`ScriptedDemand`].
//! - [`Simulation`] — builds the ledger (explicit or seeded random claims)
//!   and runs one task per customer.
//! - [`SimulationReport`] — per-customer outcomes, allocator stats and the
//!   final ledger.
//!
//! Every random choice (claims, demand, work time) derives from one seed,
//! so a run's requests are reproducible even though task interleaving is not.

pub mod claims;
pub mod config;
pub mod demand;
pub mod driver;
pub mod error;
pub mod report;

pub use claims::random_claims;
pub use config::SimulationConfig;
pub use demand::greedy::GreedyDemand;
pub use demand::random::RandomDemand;
pub use demand::scripted::ScriptedDemand;
pub use demand::DemandStrategy;
pub use driver::Simulation;
pub use error::SimulationError;
pub use report::{CustomerReport, SimulationReport};
