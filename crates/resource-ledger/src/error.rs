// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for ledger construction and accounting.

/// Errors raised while building, mutating, or verifying a [`Ledger`](crate::Ledger).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// A resource vector was given with no entries.
    #[error("resource vector is empty: at least one resource type is required")]
    EmptyVector,

    /// A resource count could not be parsed as a non-negative integer.
    #[error("malformed resource count '{input}': {reason}")]
    MalformedVector { input: String, reason: String },

    /// A vector does not have one entry per resource type.
    #[error("{context}: expected {expected} resource types, got {actual}")]
    DimensionMismatch {
        context: String,
        expected: usize,
        actual: usize,
    },

    /// The maximum and allocation matrices describe different customer counts.
    #[error("customer count mismatch: {maximum} maximum rows but {allocation} allocation rows")]
    CustomerCountMismatch { maximum: usize, allocation: usize },

    /// A ledger must track at least one customer.
    #[error("ledger has no customers")]
    NoCustomers,

    /// A customer index is outside the ledger.
    #[error("unknown customer {customer} (ledger has {customers} customers)")]
    UnknownCustomer { customer: usize, customers: usize },

    /// A declared maximum claim exceeds the total supply of that resource.
    #[error("invalid claim: customer {customer} claims {claim} units of resource {resource}, but total supply is {supply}")]
    InvalidClaim {
        customer: usize,
        resource: usize,
        claim: u32,
        supply: u32,
    },

    /// A recorded allocation exceeds the customer's declared maximum.
    #[error("customer {customer} holds {allocated} units of resource {resource}, above its maximum claim of {claim}")]
    AllocationExceedsClaim {
        customer: usize,
        resource: usize,
        allocated: u32,
        claim: u32,
    },

    /// Total supply of a resource does not fit in the unit counter.
    #[error("total supply of resource {resource} overflows")]
    SupplyOverflow { resource: usize },

    /// An accounting step would have driven a counter below zero.
    #[error("accounting underflow for customer {customer} on resource {resource}")]
    Underflow { customer: usize, resource: usize },

    /// `Available + Σ Allocation` no longer equals the total supply.
    #[error("conservation violated on resource {resource}: {available} available + {allocated} allocated != {supply} supply")]
    ConservationViolated {
        resource: usize,
        available: u64,
        allocated: u64,
        supply: u32,
    },

    /// `Need` has drifted from `Maximum − Allocation`.
    #[error("need mismatch for customer {customer}, resource {resource}: need {need} + allocation {allocation} != maximum {maximum}")]
    NeedMismatch {
        customer: usize,
        resource: usize,
        need: u32,
        allocation: u32,
        maximum: u32,
    },
}
