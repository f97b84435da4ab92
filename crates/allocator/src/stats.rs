// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Allocation statistics for diagnostics.
//!
//! [`AllocationStats`] tracks cumulative counters about how the banker is
//! being used: grant rate, why requests were refused, and the high-water
//! mark of units held. Updated inside the banker's critical section, so a
//! snapshot is always consistent with itself.

use crate::DenialReason;

/// Cumulative statistics about banker usage.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct AllocationStats {
    /// Total well-formed requests received.
    pub total_requests: u64,
    /// Requests granted.
    pub granted: u64,
    /// Requests denied for asking more than the remaining need.
    pub denied_exceeds_need: u64,
    /// Requests denied for asking more than is free.
    pub denied_exceeds_available: u64,
    /// Requests rolled back because they would leave the system unsafe.
    pub denied_unsafe: u64,
    /// Successful releases.
    pub releases: u64,
    /// Releases rejected for naming more units than were held.
    pub over_releases: u64,
    /// Safety checks run.
    pub safety_checks: u64,
    /// Peak total units held across all customers.
    pub peak_allocated_units: u64,
}

impl AllocationStats {
    /// Total denied requests, all reasons.
    pub fn denied(&self) -> u64 {
        self.denied_exceeds_need + self.denied_exceeds_available + self.denied_unsafe
    }

    /// Returns the grant ratio as a fraction in `[0.0, 1.0]`.
    ///
    /// Returns `0.0` if no requests have been made.
    pub fn grant_ratio(&self) -> f64 {
        if self.total_requests == 0 {
            return 0.0;
        }
        self.granted as f64 / self.total_requests as f64
    }

    pub(crate) fn record_request(&mut self) {
        self.total_requests += 1;
    }

    pub(crate) fn record_safety_check(&mut self) {
        self.safety_checks += 1;
    }

    /// Records a grant and updates the high-water mark.
    pub(crate) fn record_grant(&mut self, allocated_units: u64) {
        self.granted += 1;
        if allocated_units > self.peak_allocated_units {
            self.peak_allocated_units = allocated_units;
        }
    }

    pub(crate) fn record_denial(&mut self, reason: &DenialReason) {
        match reason {
            DenialReason::ExceedsNeed { .. } => self.denied_exceeds_need += 1,
            DenialReason::ExceedsAvailable { .. } => self.denied_exceeds_available += 1,
            DenialReason::UnsafeState => self.denied_unsafe += 1,
        }
    }

    pub(crate) fn record_release(&mut self) {
        self.releases += 1;
    }

    pub(crate) fn record_over_release(&mut self) {
        self.over_releases += 1;
    }

    /// Returns a human-readable summary.
    pub fn summary(&self) -> String {
        format!(
            "Requests: {} total ({} granted, {} denied, {:.0}% grant rate; \
             {} over need, {} over available, {} unsafe), \
             {} releases, {} over-releases, {} safety checks, peak {} units held",
            self.total_requests,
            self.granted,
            self.denied(),
            self.grant_ratio() * 100.0,
            self.denied_exceeds_need,
            self.denied_exceeds_available,
            self.denied_unsafe,
            self.releases,
            self.over_releases,
            self.safety_checks,
            self.peak_allocated_units,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let s = AllocationStats::default();
        assert_eq!(s.total_requests, 0);
        assert_eq!(s.grant_ratio(), 0.0);
    }

    #[test]
    fn test_grant_ratio() {
        let mut s = AllocationStats::default();
        for _ in 0..3 {
            s.record_request();
        }
        s.record_grant(1);
        s.record_grant(2);
        s.record_denial(&DenialReason::UnsafeState);
        assert!((s.grant_ratio() - 2.0 / 3.0).abs() < 1e-6);
        assert_eq!(s.denied(), 1);
    }

    #[test]
    fn test_denials_by_reason() {
        let mut s = AllocationStats::default();
        s.record_denial(&DenialReason::ExceedsNeed {
            resource: 0,
            requested: 2,
            need: 1,
        });
        s.record_denial(&DenialReason::ExceedsAvailable {
            resource: 1,
            requested: 2,
            available: 0,
        });
        s.record_denial(&DenialReason::UnsafeState);
        s.record_denial(&DenialReason::UnsafeState);
        assert_eq!(s.denied_exceeds_need, 1);
        assert_eq!(s.denied_exceeds_available, 1);
        assert_eq!(s.denied_unsafe, 2);
        assert_eq!(s.denied(), 4);
    }

    #[test]
    fn test_peak_tracking() {
        let mut s = AllocationStats::default();
        s.record_grant(10);
        s.record_grant(4); // Doesn't decrease.
        assert_eq!(s.peak_allocated_units, 10);
        s.record_grant(12);
        assert_eq!(s.peak_allocated_units, 12);
    }

    #[test]
    fn test_summary() {
        let mut s = AllocationStats::default();
        s.record_request();
        s.record_safety_check();
        s.record_grant(5);
        s.record_release();
        let summary = s.summary();
        assert!(summary.contains("1 total"));
        assert!(summary.contains("1 granted"));
        assert!(summary.contains("100% grant rate"));
        assert!(summary.contains("peak 5 units"));
    }

    #[test]
    fn test_stats_json() {
        let mut s = AllocationStats::default();
        s.record_request();
        s.record_denial(&DenialReason::UnsafeState);
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["total_requests"], 1);
        assert_eq!(json["denied_unsafe"], 1);
        assert_eq!(json["granted"], 0);
    }
}
