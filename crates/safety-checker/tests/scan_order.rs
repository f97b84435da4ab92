// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Property: the verdict and the set of customers able to finish do not
//! depend on the order the safety check scans customers in.

use proptest::prelude::*;
use resource_ledger::ResourceVector;
use safety_checker::{check, check_with_order, is_valid_sequence};

type Snapshot = (ResourceVector, Vec<ResourceVector>, Vec<ResourceVector>, Vec<usize>);

/// An arbitrary snapshot plus a random permutation of its customers.
fn snapshot() -> impl Strategy<Value = Snapshot> {
    (1usize..4, 1usize..7).prop_flat_map(|(resources, customers)| {
        let row = || prop::collection::vec(0u32..6, resources).prop_map(ResourceVector::new);
        (
            row(),
            prop::collection::vec(row(), customers),
            prop::collection::vec(row(), customers),
            Just((0..customers).collect::<Vec<_>>()).prop_shuffle(),
        )
    })
}

proptest! {
    #[test]
    fn test_scan_order_independence((available, allocation, need, order) in snapshot()) {
        let ascending = check(&available, &allocation, &need);
        let permuted = check_with_order(&available, &allocation, &need, &order);

        let mut reversed_order: Vec<usize> = (0..need.len()).collect();
        reversed_order.reverse();
        let reversed = check_with_order(&available, &allocation, &need, &reversed_order);

        for other in [&permuted, &reversed] {
            prop_assert_eq!(other.is_safe(), ascending.is_safe());
            prop_assert_eq!(other.finished(), ascending.finished());
            prop_assert_eq!(other.sequence().len(), ascending.sequence().len());
        }
        if ascending.is_safe() {
            prop_assert!(is_valid_sequence(&available, &allocation, &need, ascending.sequence()));
            prop_assert!(is_valid_sequence(&available, &allocation, &need, permuted.sequence()));
        }
    }
}
