// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # allocator
//!
//! The Banker's Algorithm request/release protocol: customers ask for units,
//! and a request is granted only if the system stays in a safe state
//! afterwards.
//!
//! # Key Components
//!
//! - [`Banker`] — owns the [`Ledger`](resource_ledger::Ledger) behind one
//!   mutex; `request` and `release` are linearizable with each other.
//! - [`RequestOutcome`] / [`DenialReason`] — `Granted`, or `Denied` because
//!   the request exceeds need, exceeds what is free, or would be unsafe.
//! - [`ResourceHold`] — an RAII grant. Dropping it releases exactly the
//!   granted units.
//! - [`AllocationStats`] — cumulative counters (grant rate, denials by
//!   reason, peak units held).
//!
//! # Ownership Model
//!
//! ```text
//! Banker::try_hold(i, v)
//!       │
//!       ▼
//!  ResourceHold  ◄─── holds a Banker clone (Arc<BankerInner>)
//!       │
//!       │  drop() / release()
//!       ▼
//!  Banker::release(i, v)  ──► ledger
//! ```
//!
//! # Example
//! ```
//! use allocator::{Banker, DenialReason, RequestOutcome};
//! use resource_ledger::ResourceVector;
//!
//! let banker = Banker::with_claims(
//!     ResourceVector::from([2]),
//!     vec![ResourceVector::from([2]), ResourceVector::from([2])],
//! )
//! .unwrap();
//!
//! assert!(banker.request(0, &ResourceVector::from([1])).unwrap().is_granted());
//!
//! // Giving customer 1 the last unit would leave both waiting for one more.
//! assert_eq!(
//!     banker.request(1, &ResourceVector::from([1])).unwrap(),
//!     RequestOutcome::Denied(DenialReason::UnsafeState),
//! );
//! ```

mod banker;
mod error;
mod hold;
mod outcome;
mod stats;

pub use banker::Banker;
pub use error::AllocationError;
pub use hold::ResourceHold;
pub use outcome::{DenialReason, HoldOutcome, RequestOutcome};
pub use stats::AllocationStats;
