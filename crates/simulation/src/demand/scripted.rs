// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Replays a fixed list of requests, for deterministic runs.

use crate::demand::DemandStrategy;
use resource_ledger::ResourceVector;
use std::collections::VecDeque;

/// Returns the scripted requests in order, then all-zero requests.
///
/// Requests are replayed verbatim, even if they exceed the current need,
/// so a script can exercise every denial path.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDemand {
    script: VecDeque<ResourceVector>,
}

impl ScriptedDemand {
    pub fn new(script: impl IntoIterator<Item = ResourceVector>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }

    /// Requests not yet replayed.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl DemandStrategy for ScriptedDemand {
    fn name(&self) -> &str {
        "scripted"
    }

    fn next_request(&mut self, _customer: usize, need: &ResourceVector) -> ResourceVector {
        self.script
            .pop_front()
            .unwrap_or_else(|| ResourceVector::zeros(need.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replays_then_idles() {
        let mut s = ScriptedDemand::new([ResourceVector::from([1, 2]), ResourceVector::from([5, 5])]);
        let need = ResourceVector::from([1, 1]);
        assert_eq!(s.next_request(0, &need), ResourceVector::from([1, 2]));
        assert_eq!(s.remaining(), 1);
        assert_eq!(s.next_request(0, &need), ResourceVector::from([5, 5]));
        assert!(s.next_request(0, &need).is_zero());
    }
}
