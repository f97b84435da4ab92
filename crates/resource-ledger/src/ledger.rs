// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The shared allocation state of one Banker's Algorithm run.
//!
//! A [`Ledger`] holds four containers sized by `C` customers and `R`
//! resource types:
//!
//! ```text
//! available   : R        units not held by anyone
//! maximum     : C × R    declared upper bound per customer (immutable)
//! allocation  : C × R    units currently held
//! need        : C × R    maximum − allocation, kept incrementally
//! ```
//!
//! Two invariants hold after every completed operation:
//!
//! - **conservation**: `available[j] + Σ_i allocation[i][j] == total_supply[j]`
//! - **need consistency**: `need[i][j] + allocation[i][j] == maximum[i][j]`
//!
//! The mutators ([`Ledger::grant`], [`Ledger::reclaim`]) preserve both by
//! construction and never wrap: a step that would underflow fails before any
//! counter is touched. [`Ledger::verify`] re-derives the invariants from
//! scratch for tests and debug assertions.

use crate::{LedgerError, ResourceVector};

/// Allocation bookkeeping for a fixed set of customers and resource types.
///
/// # Example
/// ```
/// use resource_ledger::{Ledger, ResourceVector};
///
/// let mut ledger = Ledger::new(
///     ResourceVector::from([10, 5, 7]),
///     vec![ResourceVector::from([7, 5, 3]), ResourceVector::from([3, 2, 2])],
/// )
/// .unwrap();
///
/// ledger.grant(0, &ResourceVector::from([2, 1, 0])).unwrap();
/// assert_eq!(ledger.available(), &ResourceVector::from([8, 4, 7]));
/// assert_eq!(ledger.need(0), &ResourceVector::from([5, 4, 3]));
/// ledger.verify().unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Ledger {
    total_supply: ResourceVector,
    available: ResourceVector,
    maximum: Vec<ResourceVector>,
    allocation: Vec<ResourceVector>,
    need: Vec<ResourceVector>,
}

impl Ledger {
    /// Creates a fresh ledger: nothing allocated, every customer's need equal
    /// to its maximum claim.
    ///
    /// Fails with [`LedgerError::InvalidClaim`] if any claim exceeds the total
    /// supply of its resource type. Claims are never clamped.
    pub fn new(
        total_supply: ResourceVector,
        max_claims: Vec<ResourceVector>,
    ) -> Result<Self, LedgerError> {
        if total_supply.is_empty() {
            return Err(LedgerError::EmptyVector);
        }
        if max_claims.is_empty() {
            return Err(LedgerError::NoCustomers);
        }

        let resources = total_supply.len();
        for (customer, claim) in max_claims.iter().enumerate() {
            claim.expect_len(resources, &format!("maximum claim of customer {customer}"))?;
            check_claim(customer, claim, &total_supply)?;
        }

        let allocation = vec![ResourceVector::zeros(resources); max_claims.len()];
        Ok(Self {
            available: total_supply.clone(),
            total_supply,
            need: max_claims.clone(),
            maximum: max_claims,
            allocation,
        })
    }

    /// Rebuilds a ledger from a recorded mid-run state.
    ///
    /// Total supply is derived as `available + Σ allocation` and need as
    /// `maximum − allocation`.
    pub fn from_parts(
        available: ResourceVector,
        maximum: Vec<ResourceVector>,
        allocation: Vec<ResourceVector>,
    ) -> Result<Self, LedgerError> {
        if available.is_empty() {
            return Err(LedgerError::EmptyVector);
        }
        if maximum.is_empty() {
            return Err(LedgerError::NoCustomers);
        }
        if maximum.len() != allocation.len() {
            return Err(LedgerError::CustomerCountMismatch {
                maximum: maximum.len(),
                allocation: allocation.len(),
            });
        }

        let resources = available.len();
        let mut total_supply = available.clone();
        let mut need = Vec::with_capacity(maximum.len());

        for (customer, (claim, held)) in maximum.iter().zip(&allocation).enumerate() {
            claim.expect_len(resources, &format!("maximum claim of customer {customer}"))?;
            held.expect_len(resources, &format!("allocation of customer {customer}"))?;

            let remaining = claim.checked_sub(held).ok_or_else(|| {
                let (resource, allocated, claim) = held
                    .first_excess(claim)
                    .unwrap_or((0, 0, 0));
                LedgerError::AllocationExceedsClaim {
                    customer,
                    resource,
                    allocated,
                    claim,
                }
            })?;
            need.push(remaining);

            total_supply = total_supply.checked_add(held).ok_or_else(|| {
                let resource = (0..resources)
                    .find(|&j| total_supply[j].checked_add(held[j]).is_none())
                    .unwrap_or(0);
                LedgerError::SupplyOverflow { resource }
            })?;
        }

        for (customer, claim) in maximum.iter().enumerate() {
            check_claim(customer, claim, &total_supply)?;
        }

        Ok(Self {
            total_supply,
            available,
            maximum,
            allocation,
            need,
        })
    }

    pub fn num_customers(&self) -> usize {
        self.maximum.len()
    }

    pub fn num_resources(&self) -> usize {
        self.total_supply.len()
    }

    /// Units of each resource type fixed at construction.
    pub fn total_supply(&self) -> &ResourceVector {
        &self.total_supply
    }

    /// Units of each resource type currently unallocated.
    pub fn available(&self) -> &ResourceVector {
        &self.available
    }

    /// Declared maximum claim of `customer`.
    ///
    /// # Panics
    /// Panics if `customer` is out of range; see [`Ledger::check_customer`].
    pub fn maximum(&self, customer: usize) -> &ResourceVector {
        &self.maximum[customer]
    }

    /// Units currently held by `customer`.
    ///
    /// # Panics
    /// Panics if `customer` is out of range.
    pub fn allocation(&self, customer: usize) -> &ResourceVector {
        &self.allocation[customer]
    }

    /// Remaining units `customer` may still request.
    ///
    /// # Panics
    /// Panics if `customer` is out of range.
    pub fn need(&self, customer: usize) -> &ResourceVector {
        &self.need[customer]
    }

    pub fn maximums(&self) -> &[ResourceVector] {
        &self.maximum
    }

    pub fn allocations(&self) -> &[ResourceVector] {
        &self.allocation
    }

    pub fn needs(&self) -> &[ResourceVector] {
        &self.need
    }

    /// Fails with [`LedgerError::UnknownCustomer`] if `customer` is not tracked.
    pub fn check_customer(&self, customer: usize) -> Result<(), LedgerError> {
        if customer >= self.num_customers() {
            return Err(LedgerError::UnknownCustomer {
                customer,
                customers: self.num_customers(),
            });
        }
        Ok(())
    }

    /// Moves `units` from the available pool to `customer`.
    ///
    /// `available −= units`, `allocation[customer] += units`,
    /// `need[customer] −= units`. Either all three change or none do.
    /// No safety check is performed here.
    pub fn grant(&mut self, customer: usize, units: &ResourceVector) -> Result<(), LedgerError> {
        self.check_operands(customer, units)?;

        let available = sub_or_underflow(&self.available, units, customer)?;
        let need = sub_or_underflow(&self.need[customer], units, customer)?;
        // allocation + units <= maximum once need has not underflowed.
        let allocation = add_or_underflow(&self.allocation[customer], units, customer)?;

        self.available = available;
        self.need[customer] = need;
        self.allocation[customer] = allocation;
        Ok(())
    }

    /// Returns `units` held by `customer` to the available pool.
    ///
    /// The exact inverse of [`Ledger::grant`]: used both to release resources
    /// and to roll back a tentative grant.
    pub fn reclaim(&mut self, customer: usize, units: &ResourceVector) -> Result<(), LedgerError> {
        self.check_operands(customer, units)?;

        let allocation = sub_or_underflow(&self.allocation[customer], units, customer)?;
        let need = add_or_underflow(&self.need[customer], units, customer)?;
        let available = add_or_underflow(&self.available, units, customer)?;

        self.allocation[customer] = allocation;
        self.need[customer] = need;
        self.available = available;
        Ok(())
    }

    /// Recomputes conservation and need consistency from scratch.
    pub fn verify(&self) -> Result<(), LedgerError> {
        for resource in 0..self.num_resources() {
            let available = u64::from(self.available[resource]);
            let allocated: u64 = self
                .allocation
                .iter()
                .map(|row| u64::from(row[resource]))
                .sum();
            let supply = self.total_supply[resource];
            if available + allocated != u64::from(supply) {
                return Err(LedgerError::ConservationViolated {
                    resource,
                    available,
                    allocated,
                    supply,
                });
            }
        }

        for customer in 0..self.num_customers() {
            for resource in 0..self.num_resources() {
                let need = self.need[customer][resource];
                let allocation = self.allocation[customer][resource];
                let maximum = self.maximum[customer][resource];
                if u64::from(need) + u64::from(allocation) != u64::from(maximum) {
                    return Err(LedgerError::NeedMismatch {
                        customer,
                        resource,
                        need,
                        allocation,
                        maximum,
                    });
                }
            }
        }
        Ok(())
    }

    /// Total units currently held by all customers.
    pub fn allocated_units(&self) -> u64 {
        self.allocation.iter().map(ResourceVector::total_units).sum()
    }

    fn check_operands(&self, customer: usize, units: &ResourceVector) -> Result<(), LedgerError> {
        self.check_customer(customer)?;
        units.expect_len(self.num_resources(), &format!("vector for customer {customer}"))
    }
}

fn check_claim(
    customer: usize,
    claim: &ResourceVector,
    supply: &ResourceVector,
) -> Result<(), LedgerError> {
    match claim.first_excess(supply) {
        Some((resource, claim, supply)) => Err(LedgerError::InvalidClaim {
            customer,
            resource,
            claim,
            supply,
        }),
        None => Ok(()),
    }
}

fn sub_or_underflow(
    from: &ResourceVector,
    units: &ResourceVector,
    customer: usize,
) -> Result<ResourceVector, LedgerError> {
    from.checked_sub(units).ok_or_else(|| LedgerError::Underflow {
        customer,
        resource: units.first_excess(from).map_or(0, |(j, _, _)| j),
    })
}

fn add_or_underflow(
    to: &ResourceVector,
    units: &ResourceVector,
    customer: usize,
) -> Result<ResourceVector, LedgerError> {
    to.checked_add(units).ok_or_else(|| LedgerError::Underflow {
        customer,
        resource: (0..to.len())
            .find(|&j| to[j].checked_add(units[j]).is_none())
            .unwrap_or(0),
    })
}

/// A recorded ledger state in textbook form, as loaded from TOML or JSON.
///
/// ```toml
/// available  = [3, 3, 2]
/// maximum    = [[7, 5, 3], [3, 2, 2]]
/// allocation = [[0, 1, 0], [2, 0, 0]]
/// ```
///
/// `allocation` may be omitted, in which case nothing is held.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LedgerState {
    pub available: ResourceVector,
    pub maximum: Vec<ResourceVector>,
    #[serde(default)]
    pub allocation: Vec<ResourceVector>,
}

impl LedgerState {
    /// Validates the state and builds a [`Ledger`] from it.
    pub fn into_ledger(self) -> Result<Ledger, LedgerError> {
        let allocation = if self.allocation.is_empty() {
            vec![ResourceVector::zeros(self.available.len()); self.maximum.len()]
        } else {
            self.allocation
        };
        Ledger::from_parts(self.available, self.maximum, allocation)
    }
}

impl From<&Ledger> for LedgerState {
    fn from(ledger: &Ledger) -> Self {
        Self {
            available: ledger.available.clone(),
            maximum: ledger.maximum.clone(),
            allocation: ledger.allocation.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v<const N: usize>(units: [u32; N]) -> ResourceVector {
        ResourceVector::from(units)
    }

    fn textbook() -> Ledger {
        Ledger::from_parts(
            v([3, 3, 2]),
            vec![v([7, 5, 3]), v([3, 2, 2]), v([9, 0, 2]), v([2, 2, 2]), v([4, 3, 3])],
            vec![v([0, 1, 0]), v([2, 0, 0]), v([3, 0, 2]), v([2, 1, 1]), v([0, 0, 2])],
        )
        .unwrap()
    }

    #[test]
    fn test_new_initial_state() {
        let ledger = Ledger::new(v([10, 5, 7]), vec![v([7, 5, 3]), v([0, 0, 0])]).unwrap();
        assert_eq!(ledger.num_customers(), 2);
        assert_eq!(ledger.num_resources(), 3);
        assert_eq!(ledger.available(), &v([10, 5, 7]));
        assert_eq!(ledger.allocation(0), &v([0, 0, 0]));
        assert_eq!(ledger.need(0), &v([7, 5, 3]));
        assert_eq!(ledger.allocated_units(), 0);
        ledger.verify().unwrap();
    }

    #[test]
    fn test_new_rejects_claim_above_supply() {
        let err = Ledger::new(v([10, 5, 7]), vec![v([7, 5, 3]), v([1, 6, 0])]).unwrap_err();
        assert_eq!(
            err,
            LedgerError::InvalidClaim {
                customer: 1,
                resource: 1,
                claim: 6,
                supply: 5,
            }
        );
    }

    #[test]
    fn test_new_rejects_bad_shapes() {
        assert!(matches!(
            Ledger::new(v([10, 5]), vec![v([1, 1, 1])]),
            Err(LedgerError::DimensionMismatch { expected: 2, actual: 3, .. })
        ));
        assert_eq!(Ledger::new(v([10]), vec![]), Err(LedgerError::NoCustomers));
        assert_eq!(
            Ledger::new(ResourceVector::zeros(0), vec![v([1])]),
            Err(LedgerError::EmptyVector)
        );
    }

    #[test]
    fn test_from_parts_derives_supply_and_need() {
        let ledger = textbook();
        assert_eq!(ledger.total_supply(), &v([10, 5, 7]));
        assert_eq!(ledger.need(0), &v([7, 4, 3]));
        assert_eq!(ledger.need(2), &v([6, 0, 0]));
        assert_eq!(ledger.need(4), &v([4, 3, 1]));
        ledger.verify().unwrap();
    }

    #[test]
    fn test_from_parts_rejects_allocation_above_claim() {
        let err = Ledger::from_parts(v([1, 1]), vec![v([2, 2])], vec![v([1, 3])]).unwrap_err();
        assert_eq!(
            err,
            LedgerError::AllocationExceedsClaim {
                customer: 0,
                resource: 1,
                allocated: 3,
                claim: 2,
            }
        );
    }

    #[test]
    fn test_from_parts_rejects_claim_above_derived_supply() {
        let err = Ledger::from_parts(v([1]), vec![v([5]), v([1])], vec![v([1]), v([0])]).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidClaim { customer: 0, claim: 5, supply: 2, .. }));
    }

    #[test]
    fn test_from_parts_rejects_row_count_mismatch() {
        let err = Ledger::from_parts(v([1]), vec![v([1]), v([1])], vec![v([0])]).unwrap_err();
        assert_eq!(err, LedgerError::CustomerCountMismatch { maximum: 2, allocation: 1 });
    }

    #[test]
    fn test_grant_and_reclaim_are_inverse() {
        let mut ledger = textbook();
        let before = ledger.clone();

        ledger.grant(1, &v([1, 0, 2])).unwrap();
        assert_eq!(ledger.available(), &v([2, 3, 0]));
        assert_eq!(ledger.allocation(1), &v([3, 0, 2]));
        assert_eq!(ledger.need(1), &v([0, 2, 0]));
        ledger.verify().unwrap();

        ledger.reclaim(1, &v([1, 0, 2])).unwrap();
        assert_eq!(ledger, before);
    }

    #[test]
    fn test_grant_beyond_need_leaves_ledger_untouched() {
        let mut ledger = textbook();
        let before = ledger.clone();

        // Customer 3 still needs [0, 1, 1]; available is plentiful.
        let err = ledger.grant(3, &v([1, 0, 0])).unwrap_err();
        assert_eq!(err, LedgerError::Underflow { customer: 3, resource: 0 });
        assert_eq!(ledger, before);
    }

    #[test]
    fn test_reclaim_beyond_allocation_fails() {
        let mut ledger = textbook();
        let before = ledger.clone();
        let err = ledger.reclaim(4, &v([0, 0, 3])).unwrap_err();
        assert_eq!(err, LedgerError::Underflow { customer: 4, resource: 2 });
        assert_eq!(ledger, before);
    }

    #[test]
    fn test_unknown_customer() {
        let mut ledger = textbook();
        assert_eq!(
            ledger.grant(5, &v([0, 0, 0])),
            Err(LedgerError::UnknownCustomer { customer: 5, customers: 5 })
        );
    }

    #[test]
    fn test_verify_detects_drift() {
        let mut ledger = textbook();
        ledger.available = v([4, 3, 2]);
        assert!(matches!(
            ledger.verify(),
            Err(LedgerError::ConservationViolated { resource: 0, .. })
        ));

        let mut ledger = textbook();
        ledger.need[2] = v([6, 0, 1]);
        assert!(matches!(
            ledger.verify(),
            Err(LedgerError::NeedMismatch { customer: 2, resource: 2, .. })
        ));
    }

    #[test]
    fn test_state_from_toml() {
        let toml_str = r#"
available = [3, 3, 2]
maximum = [[7, 5, 3], [3, 2, 2]]
allocation = [[0, 1, 0], [2, 0, 0]]
"#;
        let state: LedgerState = toml::from_str(toml_str).unwrap();
        let ledger = state.into_ledger().unwrap();
        assert_eq!(ledger.total_supply(), &v([5, 4, 2]));
        assert_eq!(ledger.need(1), &v([1, 2, 2]));
    }

    #[test]
    fn test_state_without_allocation() {
        let state = LedgerState {
            available: v([4, 4]),
            maximum: vec![v([2, 4]), v([4, 0])],
            allocation: vec![],
        };
        let ledger = state.into_ledger().unwrap();
        assert_eq!(ledger.allocated_units(), 0);
        assert_eq!(ledger.total_supply(), &v([4, 4]));
    }

    #[test]
    fn test_state_roundtrip_through_ledger() {
        let ledger = textbook();
        let state = LedgerState::from(&ledger);
        assert_eq!(state.into_ledger().unwrap(), ledger);
    }
}
