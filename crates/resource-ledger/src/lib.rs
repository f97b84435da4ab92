// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # resource-ledger
//!
//! Allocation bookkeeping for Banker's Algorithm deadlock avoidance: how many
//! units of each resource type are free, how many each customer holds, and
//! how many each customer may still ask for.
//!
//! # Key Components
//!
//! - [`ResourceVector`] — one unit count per resource type, with checked
//!   arithmetic and argument parsing (`"10 5 7"`, `"10,5,7"`).
//! - [`Ledger`] — Available, Maximum, Allocation and Need for `C` customers
//!   and `R` resource types, with all-or-nothing `grant`/`reclaim` steps and
//!   an invariant checker.
//! - [`LedgerState`] — the serialisable textbook form used to load a
//!   recorded state.
//! - [`LedgerError`] — construction and accounting failures.
//!
//! # Ownership Model
//!
//! A `Ledger` is a plain owned value. It carries no locking of its own: the
//! allocator crate wraps exactly one ledger in a mutex and is the only code
//! that mutates it during a run. Independent ledgers (e.g. one per test)
//! coexist freely.
//!
//! # Example
//! ```
//! use resource_ledger::{Ledger, ResourceVector};
//!
//! let supply = ResourceVector::parse_args(&["10", "5", "7"]).unwrap();
//! let ledger = Ledger::new(supply, vec![ResourceVector::from([7, 5, 3])]).unwrap();
//!
//! assert_eq!(ledger.need(0), ledger.maximum(0));
//! ledger.verify().unwrap();
//! ```

mod error;
mod ledger;
mod vector;

pub use error::LedgerError;
pub use ledger::{Ledger, LedgerState};
pub use vector::ResourceVector;
