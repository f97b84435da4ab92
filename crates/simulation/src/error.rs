// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for the customer simulation.

/// Errors that can occur while setting up or running a simulation.
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// The ledger could not be built (e.g. a claim exceeds total supply).
    #[error("ledger error: {0}")]
    Ledger(#[from] resource_ledger::LedgerError),

    /// A customer misused the allocator.
    #[error("allocation error: {0}")]
    Allocation(#[from] allocator::AllocationError),

    /// A customer task panicked or was cancelled.
    #[error("customer task failed: {0}")]
    Task(String),
}
