// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The [`DemandStrategy`] trait and strategy implementations.

pub mod greedy;
pub mod random;
pub mod scripted;

use resource_ledger::ResourceVector;

/// Decides what a customer asks for next.
///
/// Each customer owns its own strategy instance, so implementations may
/// keep state (an RNG, a script cursor) without synchronisation.
///
/// Strategies never see the ledger, only the customer's current need, so
/// the allocator's behaviour stays testable independently of the demand
/// pattern.
pub trait DemandStrategy: Send {
    /// Human-readable name of this strategy.
    fn name(&self) -> &str;

    /// Produces the next request for `customer`, given its remaining need.
    ///
    /// Returning an all-zero vector means "nothing to ask for this round".
    fn next_request(&mut self, customer: usize, need: &ResourceVector) -> ResourceVector;
}
