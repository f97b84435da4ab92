// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for the allocation protocol.
//!
//! These are caller bugs, not denials: a request the banker merely refuses
//! comes back as [`RequestOutcome::Denied`](crate::RequestOutcome::Denied).

use resource_ledger::LedgerError;

/// Errors that indicate misuse of the [`Banker`](crate::Banker).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AllocationError {
    /// The customer index is not tracked by this banker.
    #[error("unknown customer {customer} (banker serves {customers} customers)")]
    UnknownCustomer { customer: usize, customers: usize },

    /// The request or release vector has the wrong number of resource types.
    #[error("vector has {actual} resource types, banker tracks {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A release names more units than the customer currently holds.
    #[error("over-release: customer {customer} tried to release {requested} units of resource {resource} but holds {held}")]
    OverRelease {
        customer: usize,
        resource: usize,
        requested: u32,
        held: u32,
    },

    /// The ledger rejected an accounting step.
    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),
}
