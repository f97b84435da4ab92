// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! RAII hold that returns granted units to the banker on drop.
//!
//! [`ResourceHold`] ties a grant to a value: releasing it (explicitly or by
//! dropping it) returns exactly the units that were granted, so a customer
//! cannot forget to release or release the wrong amount.

use crate::{AllocationError, Banker};
use resource_ledger::ResourceVector;

/// Units granted to one customer, returned to the [`Banker`] when dropped.
///
/// # Example
/// ```
/// use allocator::{Banker, HoldOutcome};
/// use resource_ledger::ResourceVector;
///
/// let banker = Banker::with_claims(
///     ResourceVector::from([4, 4]),
///     vec![ResourceVector::from([2, 3])],
/// )
/// .unwrap();
///
/// match banker.try_hold(0, ResourceVector::from([1, 3])).unwrap() {
///     HoldOutcome::Held(hold) => {
///         assert_eq!(banker.available(), ResourceVector::from([3, 1]));
///         drop(hold);
///     }
///     HoldOutcome::Denied(reason) => panic!("unexpected denial: {reason}"),
/// }
/// assert_eq!(banker.available(), ResourceVector::from([4, 4]));
/// ```
pub struct ResourceHold {
    banker: Banker,
    customer: usize,
    units: ResourceVector,
    released: bool,
}

impl ResourceHold {
    pub(crate) fn new(banker: Banker, customer: usize, units: ResourceVector) -> Self {
        Self {
            banker,
            customer,
            units,
            released: false,
        }
    }

    /// The customer holding the units.
    pub fn customer(&self) -> usize {
        self.customer
    }

    /// The units granted.
    pub fn units(&self) -> &ResourceVector {
        &self.units
    }

    /// Releases the units now, surfacing any error instead of logging it.
    pub fn release(mut self) -> Result<(), AllocationError> {
        self.released = true;
        self.banker.release(self.customer, &self.units)
    }
}

impl Drop for ResourceHold {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        if let Err(e) = self.banker.release(self.customer, &self.units) {
            tracing::error!(customer = self.customer, units = %self.units, "failed to release hold: {e}");
        }
    }
}

impl std::fmt::Debug for ResourceHold {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceHold")
            .field("customer", &self.customer)
            .field("units", &self.units)
            .field("released", &self.released)
            .finish()
    }
}
