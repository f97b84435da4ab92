// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The request/release protocol.
//!
//! The [`Banker`] owns one [`Ledger`] behind a single mutex. Every `request`
//! and every `release` holds that lock for its full duration:
//!
//! ```text
//! request(i, v)
//!   lock ─► v ≤ need[i]? ─► v ≤ available? ─► grant ─► safe? ─► Granted
//!              │ no             │ no                    │ no
//!              ▼                ▼                       ▼
//!        Denied(ExceedsNeed) Denied(ExceedsAvailable)  reclaim ─► Denied(UnsafeState)
//! ```
//!
//! The tentative grant and its rollback happen inside the same critical
//! section, so no other thread ever observes a state the safety checker
//! would reject.
//!
//! # Thread Safety
//! `Banker` is `Clone`; clones share the same ledger via `Arc`. Hand one to
//! each customer thread or task.

use crate::{AllocationError, AllocationStats, DenialReason, HoldOutcome, RequestOutcome, ResourceHold};
use resource_ledger::{Ledger, LedgerError, ResourceVector};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Everything guarded by the banker's lock.
#[derive(Debug)]
struct BankState {
    ledger: Ledger,
    stats: AllocationStats,
}

#[derive(Debug)]
struct BankerInner {
    state: Mutex<BankState>,
    // Fixed at construction; readable without the lock.
    customers: usize,
    resources: usize,
}

/// Deadlock-avoiding allocator for a fixed set of customers.
///
/// # Example
/// ```
/// use allocator::{Banker, RequestOutcome};
/// use resource_ledger::ResourceVector;
///
/// let banker = Banker::with_claims(
///     ResourceVector::from([10, 5, 7]),
///     vec![ResourceVector::from([7, 5, 3]), ResourceVector::from([3, 2, 2])],
/// )
/// .unwrap();
///
/// let req = ResourceVector::from([2, 1, 1]);
/// assert_eq!(banker.request(1, &req).unwrap(), RequestOutcome::Granted);
/// assert_eq!(banker.available(), ResourceVector::from([8, 4, 6]));
///
/// banker.release(1, &req).unwrap();
/// assert_eq!(banker.available(), ResourceVector::from([10, 5, 7]));
/// ```
#[derive(Debug, Clone)]
pub struct Banker {
    inner: Arc<BankerInner>,
}

impl Banker {
    /// Wraps an existing ledger.
    pub fn new(ledger: Ledger) -> Self {
        let customers = ledger.num_customers();
        let resources = ledger.num_resources();
        tracing::debug!(
            customers,
            resources,
            supply = %ledger.total_supply(),
            "banker created"
        );
        Self {
            inner: Arc::new(BankerInner {
                state: Mutex::new(BankState {
                    ledger,
                    stats: AllocationStats::default(),
                }),
                customers,
                resources,
            }),
        }
    }

    /// Builds a fresh ledger from total supply and per-customer maximum
    /// claims. Fails with [`LedgerError::InvalidClaim`] on any claim above
    /// supply.
    pub fn with_claims(
        total_supply: ResourceVector,
        max_claims: Vec<ResourceVector>,
    ) -> Result<Self, LedgerError> {
        Ok(Self::new(Ledger::new(total_supply, max_claims)?))
    }

    pub fn num_customers(&self) -> usize {
        self.inner.customers
    }

    pub fn num_resources(&self) -> usize {
        self.inner.resources
    }

    /// Asks for `request` more units on behalf of `customer`.
    ///
    /// Returns `Denied` without touching the ledger if the request exceeds
    /// the customer's remaining need or the free units, or if granting it
    /// would leave the system unsafe. Errors are reserved for caller bugs
    /// (unknown customer, wrong vector width).
    pub fn request(
        &self,
        customer: usize,
        request: &ResourceVector,
    ) -> Result<RequestOutcome, AllocationError> {
        self.check_operands(customer, request)?;

        let mut guard = self.lock();
        let BankState { ledger, stats } = &mut *guard;
        stats.record_request();

        if let Some((resource, requested, need)) = request.first_excess(ledger.need(customer)) {
            let reason = DenialReason::ExceedsNeed {
                resource,
                requested,
                need,
            };
            stats.record_denial(&reason);
            tracing::debug!(customer, %request, %reason, "request denied");
            return Ok(RequestOutcome::Denied(reason));
        }

        if let Some((resource, requested, available)) = request.first_excess(ledger.available()) {
            let reason = DenialReason::ExceedsAvailable {
                resource,
                requested,
                available,
            };
            stats.record_denial(&reason);
            tracing::debug!(customer, %request, %reason, "request denied");
            return Ok(RequestOutcome::Denied(reason));
        }

        ledger.grant(customer, request)?;
        stats.record_safety_check();

        if safety_checker::is_safe(ledger.available(), ledger.allocations(), ledger.needs()) {
            stats.record_grant(ledger.allocated_units());
            debug_assert_eq!(ledger.verify(), Ok(()));
            tracing::debug!(customer, %request, available = %ledger.available(), "request granted");
            Ok(RequestOutcome::Granted)
        } else {
            ledger.reclaim(customer, request)?;
            let reason = DenialReason::UnsafeState;
            stats.record_denial(&reason);
            tracing::trace!(customer, %request, "tentative grant rolled back");
            tracing::debug!(customer, %request, %reason, "request denied");
            Ok(RequestOutcome::Denied(reason))
        }
    }

    /// Returns `release` units held by `customer`.
    ///
    /// Releasing can only keep or restore safety, so no check is run.
    /// Naming more units than the customer holds fails with
    /// [`AllocationError::OverRelease`] and changes nothing.
    pub fn release(&self, customer: usize, release: &ResourceVector) -> Result<(), AllocationError> {
        self.check_operands(customer, release)?;

        let mut guard = self.lock();
        let BankState { ledger, stats } = &mut *guard;

        if let Some((resource, requested, held)) = release.first_excess(ledger.allocation(customer)) {
            stats.record_over_release();
            tracing::warn!(customer, resource, requested, held, "over-release rejected");
            return Err(AllocationError::OverRelease {
                customer,
                resource,
                requested,
                held,
            });
        }

        ledger.reclaim(customer, release)?;
        stats.record_release();
        tracing::debug!(customer, %release, available = %ledger.available(), "resources released");
        Ok(())
    }

    /// Like [`Banker::request`], but on a grant returns a [`ResourceHold`]
    /// that gives the units back when released or dropped.
    pub fn try_hold(
        &self,
        customer: usize,
        request: ResourceVector,
    ) -> Result<HoldOutcome, AllocationError> {
        match self.request(customer, &request)? {
            RequestOutcome::Granted => Ok(HoldOutcome::Held(ResourceHold::new(
                self.clone(),
                customer,
                request,
            ))),
            RequestOutcome::Denied(reason) => Ok(HoldOutcome::Denied(reason)),
        }
    }

    /// Returns a copy of the whole ledger, taken atomically.
    pub fn snapshot(&self) -> Ledger {
        self.lock().ledger.clone()
    }

    /// Units currently free.
    pub fn available(&self) -> ResourceVector {
        self.lock().ledger.available().clone()
    }

    /// Remaining need of `customer`.
    pub fn need(&self, customer: usize) -> Result<ResourceVector, AllocationError> {
        self.check_customer(customer)?;
        Ok(self.lock().ledger.need(customer).clone())
    }

    /// Units currently held by `customer`.
    pub fn allocation(&self, customer: usize) -> Result<ResourceVector, AllocationError> {
        self.check_customer(customer)?;
        Ok(self.lock().ledger.allocation(customer).clone())
    }

    /// Runs the safety check against the current state.
    pub fn is_safe(&self) -> bool {
        let guard = self.lock();
        safety_checker::is_safe(
            guard.ledger.available(),
            guard.ledger.allocations(),
            guard.ledger.needs(),
        )
    }

    /// Returns a snapshot of allocation statistics.
    pub fn stats(&self) -> AllocationStats {
        self.lock().stats.clone()
    }

    // A panic inside a critical section can only happen before the ledger is
    // touched or after it is consistent again, so a poisoned state is usable.
    fn lock(&self) -> MutexGuard<'_, BankState> {
        self.inner.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_customer(&self, customer: usize) -> Result<(), AllocationError> {
        if customer >= self.inner.customers {
            return Err(AllocationError::UnknownCustomer {
                customer,
                customers: self.inner.customers,
            });
        }
        Ok(())
    }

    fn check_operands(&self, customer: usize, units: &ResourceVector) -> Result<(), AllocationError> {
        self.check_customer(customer)?;
        if units.len() != self.inner.resources {
            return Err(AllocationError::DimensionMismatch {
                expected: self.inner.resources,
                actual: units.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v<const N: usize>(units: [u32; N]) -> ResourceVector {
        ResourceVector::from(units)
    }

    fn banker() -> Banker {
        Banker::with_claims(v([10, 5, 7]), vec![v([7, 5, 3]), v([3, 2, 2]), v([9, 0, 2])]).unwrap()
    }

    #[test]
    fn test_grant_updates_all_three_containers() {
        let b = banker();
        assert_eq!(b.request(0, &v([2, 1, 0])).unwrap(), RequestOutcome::Granted);

        let ledger = b.snapshot();
        assert_eq!(ledger.available(), &v([8, 4, 7]));
        assert_eq!(ledger.allocation(0), &v([2, 1, 0]));
        assert_eq!(ledger.need(0), &v([5, 4, 3]));
        ledger.verify().unwrap();
    }

    #[test]
    fn test_exceeds_need_is_denied() {
        let b = banker();
        let before = b.snapshot();
        let outcome = b.request(1, &v([4, 0, 0])).unwrap();
        assert_eq!(
            outcome,
            RequestOutcome::Denied(DenialReason::ExceedsNeed {
                resource: 0,
                requested: 4,
                need: 3,
            })
        );
        assert_eq!(b.snapshot(), before);
    }

    #[test]
    fn test_exceeds_available_is_denied() {
        let b = banker();
        assert!(b.request(2, &v([8, 0, 0])).unwrap().is_granted());
        let before = b.snapshot();

        let outcome = b.request(0, &v([3, 0, 0])).unwrap();
        assert_eq!(
            outcome,
            RequestOutcome::Denied(DenialReason::ExceedsAvailable {
                resource: 0,
                requested: 3,
                available: 2,
            })
        );
        assert_eq!(b.snapshot(), before);
    }

    #[test]
    fn test_need_is_checked_before_available() {
        let b = banker();
        // Exceeds both; need wins.
        let outcome = b.request(1, &v([11, 0, 0])).unwrap();
        assert!(matches!(
            outcome,
            RequestOutcome::Denied(DenialReason::ExceedsNeed { .. })
        ));
    }

    #[test]
    fn test_unsafe_request_is_rolled_back() {
        let b = Banker::new(
            Ledger::from_parts(v([1, 0, 0]), vec![v([2, 0, 0]), v([2, 0, 0])], vec![v([1, 0, 0]), v([0, 0, 0])])
                .unwrap(),
        );
        let before = b.snapshot();

        let outcome = b.request(1, &v([1, 0, 0])).unwrap();
        assert_eq!(outcome, RequestOutcome::Denied(DenialReason::UnsafeState));
        assert_eq!(b.snapshot(), before);
        assert!(b.is_safe());
        assert_eq!(b.stats().denied_unsafe, 1);
        assert_eq!(b.stats().safety_checks, 1);
    }

    #[test]
    fn test_zero_request_is_granted() {
        let b = banker();
        assert!(b.request(0, &v([0, 0, 0])).unwrap().is_granted());
        assert_eq!(b.snapshot().allocated_units(), 0);
    }

    #[test]
    fn test_partial_release() {
        let b = banker();
        b.request(0, &v([4, 2, 1])).unwrap();
        b.release(0, &v([1, 2, 0])).unwrap();
        assert_eq!(b.allocation(0).unwrap(), v([3, 0, 1]));
        assert_eq!(b.need(0).unwrap(), v([4, 5, 2]));
        assert_eq!(b.available(), v([7, 5, 6]));
    }

    #[test]
    fn test_over_release_fails_loudly() {
        let b = banker();
        b.request(1, &v([1, 1, 1])).unwrap();
        let before = b.snapshot();

        let err = b.release(1, &v([1, 2, 0])).unwrap_err();
        assert_eq!(
            err,
            AllocationError::OverRelease {
                customer: 1,
                resource: 1,
                requested: 2,
                held: 1,
            }
        );
        assert_eq!(b.snapshot(), before);
        assert_eq!(b.stats().over_releases, 1);
    }

    #[test]
    fn test_unknown_customer_and_bad_width() {
        let b = banker();
        assert_eq!(
            b.request(3, &v([0, 0, 0])),
            Err(AllocationError::UnknownCustomer {
                customer: 3,
                customers: 3,
            })
        );
        assert_eq!(
            b.release(0, &v([0, 0])),
            Err(AllocationError::DimensionMismatch {
                expected: 3,
                actual: 2,
            })
        );
        assert!(b.need(7).is_err());
        // Caller bugs are not counted as requests.
        assert_eq!(b.stats().total_requests, 0);
    }

    #[test]
    fn test_invalid_claim_is_fatal() {
        let err = Banker::with_claims(v([3]), vec![v([4])]).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidClaim { claim: 4, supply: 3, .. }));
    }

    #[test]
    fn test_clones_share_state() {
        let a = banker();
        let b = a.clone();
        a.request(1, &v([1, 0, 0])).unwrap();
        assert_eq!(b.allocation(1).unwrap(), v([1, 0, 0]));
    }

    #[test]
    fn test_stats_peak_units() {
        let b = banker();
        b.request(0, &v([2, 2, 2])).unwrap();
        b.request(1, &v([1, 1, 1])).unwrap();
        b.release(0, &v([2, 2, 2])).unwrap();
        let stats = b.stats();
        assert_eq!(stats.granted, 2);
        assert_eq!(stats.releases, 1);
        assert_eq!(stats.peak_allocated_units, 9);
    }
}
