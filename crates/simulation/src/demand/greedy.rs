// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Greedy demand: ask for the entire remaining need at once.
//!
//! The most contended pattern. Every grant leaves the customer at its
//! maximum claim, so it can always finish and release.

use crate::demand::DemandStrategy;
use resource_ledger::ResourceVector;

/// Requests the full remaining need every round.
#[derive(Debug, Clone, Default)]
pub struct GreedyDemand;

impl GreedyDemand {
    pub fn new() -> Self {
        Self
    }
}

impl DemandStrategy for GreedyDemand {
    fn name(&self) -> &str {
        "greedy"
    }

    fn next_request(&mut self, _customer: usize, need: &ResourceVector) -> ResourceVector {
        need.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requests_full_need() {
        let need = ResourceVector::from([4, 0, 2]);
        assert_eq!(GreedyDemand::new().next_request(3, &need), need);
    }
}
