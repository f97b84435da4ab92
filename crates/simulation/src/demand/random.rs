// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Random demand within the remaining need.
//!
//! For every resource type, draws uniformly from `0..=need[j]`. A request
//! never exceeds the need, so denials come only from scarcity or safety.

use crate::demand::DemandStrategy;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use resource_ledger::ResourceVector;

/// Uniform random request bounded by the remaining need.
#[derive(Debug, Clone)]
pub struct RandomDemand {
    rng: ChaCha8Rng,
}

impl RandomDemand {
    /// Deterministic for a given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl DemandStrategy for RandomDemand {
    fn name(&self) -> &str {
        "random"
    }

    fn next_request(&mut self, _customer: usize, need: &ResourceVector) -> ResourceVector {
        need.iter()
            .map(|&n| if n == 0 { 0 } else { self.rng.gen_range(0..=n) })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_never_exceeds_need() {
        let mut s = RandomDemand::new(7);
        let need = ResourceVector::from([3, 0, 5]);
        for _ in 0..200 {
            let req = s.next_request(0, &need);
            assert!(req.fits_within(&need));
            assert_eq!(req[1], 0);
        }
    }

    #[test]
    fn test_seed_is_deterministic() {
        let need = ResourceVector::from([9, 9, 9]);
        let mut a = RandomDemand::new(42);
        let mut b = RandomDemand::new(42);
        for _ in 0..10 {
            assert_eq!(a.next_request(1, &need), b.next_request(1, &need));
        }
    }

    #[test]
    fn test_zero_need_gives_zero_request() {
        let mut s = RandomDemand::new(1);
        assert!(s.next_request(0, &ResourceVector::zeros(4)).is_zero());
    }
}
