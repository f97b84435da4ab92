// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # safety-checker
//!
//! Decides whether a resource-allocation state is *safe*: whether some
//! ordering exists in which every customer can obtain its full remaining
//! need, finish, and hand back everything it holds.
//!
//! The checker is purely algorithmic (no locking, no I/O, no mutation),
//! which keeps it trivially unit-testable and lets the allocator run it on
//! a tentative state inside its critical section.
//!
//! # Example
//! ```
//! use resource_ledger::ResourceVector;
//! use safety_checker::check;
//!
//! let available = ResourceVector::from([1, 0]);
//! let allocation = vec![ResourceVector::from([1, 0]), ResourceVector::from([1, 0])];
//! let need = vec![ResourceVector::from([2, 0]), ResourceVector::from([1, 0])];
//!
//! let report = check(&available, &allocation, &need);
//! assert!(report.is_safe());
//! assert_eq!(report.sequence(), &[1, 0]);
//! ```

mod checker;
mod report;

pub use checker::{check, check_ledger, check_with_order, is_safe, is_valid_sequence};
pub use report::SafetyReport;
