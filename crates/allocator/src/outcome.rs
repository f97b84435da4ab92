// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Request outcomes.

use crate::ResourceHold;
use std::fmt;

/// Why a request was refused. A denial never changes the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum DenialReason {
    /// The request asks for more than the customer's remaining need.
    ExceedsNeed {
        resource: usize,
        requested: u32,
        need: u32,
    },
    /// The request asks for more than is currently free.
    ExceedsAvailable {
        resource: usize,
        requested: u32,
        available: u32,
    },
    /// Granting the request would leave no guaranteed completion order.
    UnsafeState,
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExceedsNeed {
                resource,
                requested,
                need,
            } => write!(
                f,
                "exceeds need: {requested} units of resource {resource} requested, {need} still needed"
            ),
            Self::ExceedsAvailable {
                resource,
                requested,
                available,
            } => write!(
                f,
                "exceeds available: {requested} units of resource {resource} requested, {available} free"
            ),
            Self::UnsafeState => write!(f, "unsafe state"),
        }
    }
}

/// Result of [`Banker::request`](crate::Banker::request).
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum RequestOutcome {
    Granted,
    Denied(DenialReason),
}

impl RequestOutcome {
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }

    /// The denial reason, if the request was refused.
    pub fn denial(&self) -> Option<DenialReason> {
        match self {
            Self::Granted => None,
            Self::Denied(reason) => Some(*reason),
        }
    }
}

/// Result of [`Banker::try_hold`](crate::Banker::try_hold).
#[derive(Debug)]
pub enum HoldOutcome {
    /// The request was granted; the units return to the banker when the
    /// hold is released or dropped.
    Held(ResourceHold),
    Denied(DenialReason),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_helpers() {
        assert!(RequestOutcome::Granted.is_granted());
        assert_eq!(RequestOutcome::Granted.denial(), None);

        let denied = RequestOutcome::Denied(DenialReason::UnsafeState);
        assert!(!denied.is_granted());
        assert_eq!(denied.denial(), Some(DenialReason::UnsafeState));
    }

    #[test]
    fn test_reason_display() {
        let r = DenialReason::ExceedsAvailable {
            resource: 2,
            requested: 4,
            available: 1,
        };
        assert_eq!(
            r.to_string(),
            "exceeds available: 4 units of resource 2 requested, 1 free"
        );
        assert_eq!(DenialReason::UnsafeState.to_string(), "unsafe state");
    }

    #[test]
    fn test_outcome_json() {
        assert_eq!(
            serde_json::to_value(RequestOutcome::Granted).unwrap(),
            serde_json::json!("Granted")
        );
        assert_eq!(
            serde_json::to_value(RequestOutcome::Denied(DenialReason::UnsafeState)).unwrap(),
            serde_json::json!({ "Denied": "UnsafeState" })
        );
        let over_need = RequestOutcome::Denied(DenialReason::ExceedsNeed {
            resource: 1,
            requested: 3,
            need: 2,
        });
        assert_eq!(
            serde_json::to_value(over_need).unwrap(),
            serde_json::json!({
                "Denied": { "ExceedsNeed": { "resource": 1, "requested": 3, "need": 2 } }
            })
        );
    }
}
