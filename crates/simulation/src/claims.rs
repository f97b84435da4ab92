// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Randomised maximum claims.

use rand::Rng;
use resource_ledger::ResourceVector;

/// Draws one maximum claim per customer, each entry uniform in
/// `0..=supply[j]`, so no claim ever exceeds total supply.
pub fn random_claims<R: Rng + ?Sized>(
    supply: &ResourceVector,
    customers: usize,
    rng: &mut R,
) -> Vec<ResourceVector> {
    (0..customers)
        .map(|_| supply.iter().map(|&s| rng.gen_range(0..=s)).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_claims_within_supply() {
        let supply = ResourceVector::from([10, 0, 7]);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let claims = random_claims(&supply, 20, &mut rng);
        assert_eq!(claims.len(), 20);
        for claim in &claims {
            assert_eq!(claim.len(), 3);
            assert!(claim.fits_within(&supply));
            assert_eq!(claim[1], 0);
        }
    }

    #[test]
    fn test_claims_deterministic() {
        let supply = ResourceVector::from([4, 4]);
        let a = random_claims(&supply, 5, &mut ChaCha8Rng::seed_from_u64(11));
        let b = random_claims(&supply, 5, &mut ChaCha8Rng::seed_from_u64(11));
        assert_eq!(a, b);
    }
}
