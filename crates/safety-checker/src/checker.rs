// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The Banker's Algorithm safety test.
//!
//! Starting from `work = available`, repeatedly find an unfinished customer
//! whose remaining need fits within `work`, pretend it runs to completion and
//! returns everything it holds (`work += allocation[i]`), and restart the scan.
//! The state is safe iff every customer finishes.
//!
//! The scan restarts from the front of the order after every discovery, so
//! with the default ascending order the lowest-indexed runnable customer is
//! always picked next. The verdict and the finished set are independent of
//! the order; only the reported sequence changes.
//!
//! Worst case O(C² · R) per call.

use crate::SafetyReport;
use resource_ledger::{Ledger, ResourceVector};

/// Returns `true` if every customer can finish in some order.
///
/// Pure: reads the three containers and mutates nothing. Callers that share
/// a ledger must hold its lock so the three views are consistent.
pub fn is_safe(
    available: &ResourceVector,
    allocation: &[ResourceVector],
    need: &[ResourceVector],
) -> bool {
    check(available, allocation, need).is_safe()
}

/// Runs the safety test with the ascending-index tie-break and reports the
/// completion sequence.
pub fn check(
    available: &ResourceVector,
    allocation: &[ResourceVector],
    need: &[ResourceVector],
) -> SafetyReport {
    let order: Vec<usize> = (0..need.len()).collect();
    check_with_order(available, allocation, need, &order)
}

/// Runs the safety test on a whole ledger.
pub fn check_ledger(ledger: &Ledger) -> SafetyReport {
    check(ledger.available(), ledger.allocations(), ledger.needs())
}

/// Runs the safety test, scanning customers in the given order.
///
/// `order` should be a permutation of `0..need.len()`. Customers missing
/// from it are never considered and therefore never finish; out-of-range
/// indices are ignored.
pub fn check_with_order(
    available: &ResourceVector,
    allocation: &[ResourceVector],
    need: &[ResourceVector],
    order: &[usize],
) -> SafetyReport {
    let customers = need.len();
    debug_assert_eq!(allocation.len(), customers, "allocation/need row count differs");

    let mut work = available.clone();
    let mut finished = vec![false; customers];
    let mut sequence = Vec::with_capacity(customers);

    while let Some(customer) = order
        .iter()
        .copied()
        .filter(|&i| i < customers)
        .find(|&i| !finished[i] && need[i].fits_within(&work))
    {
        finished[customer] = true;
        if let Some(held) = allocation.get(customer) {
            work.saturating_add_assign(held);
        }
        sequence.push(customer);
    }

    SafetyReport::new(sequence, finished)
}

/// Returns `true` if running customers in `sequence` order is a valid
/// completion order: every customer appears exactly once and each one's need
/// fits within the resources freed by those before it.
pub fn is_valid_sequence(
    available: &ResourceVector,
    allocation: &[ResourceVector],
    need: &[ResourceVector],
    sequence: &[usize],
) -> bool {
    let customers = need.len();
    if sequence.len() != customers {
        return false;
    }

    let mut seen = vec![false; customers];
    let mut work = available.clone();
    for &customer in sequence {
        if customer >= customers || seen[customer] || !need[customer].fits_within(&work) {
            return false;
        }
        seen[customer] = true;
        if let Some(held) = allocation.get(customer) {
            work.saturating_add_assign(held);
        }
    }
    true
}
