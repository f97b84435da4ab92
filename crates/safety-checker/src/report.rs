// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Outcome of a safety check.

/// Result of one safety check over a ledger snapshot.
///
/// Besides the verdict, records the order in which customers were found
/// able to finish and which ones never could.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SafetyReport {
    safe: bool,
    sequence: Vec<usize>,
    finished: Vec<bool>,
}

impl SafetyReport {
    pub(crate) fn new(sequence: Vec<usize>, finished: Vec<bool>) -> Self {
        Self {
            safe: finished.iter().all(|&f| f),
            sequence,
            finished,
        }
    }

    /// `true` iff every customer can finish.
    pub fn is_safe(&self) -> bool {
        self.safe
    }

    /// Customers in the order they were found able to finish. A complete
    /// safe sequence when [`is_safe`](Self::is_safe) holds.
    pub fn sequence(&self) -> &[usize] {
        &self.sequence
    }

    /// Per-customer finished flags.
    pub fn finished(&self) -> &[bool] {
        &self.finished
    }

    /// Customers that could not finish, in index order.
    pub fn blocked(&self) -> Vec<usize> {
        self.finished
            .iter()
            .enumerate()
            .filter(|(_, f)| !**f)
            .map(|(i, _)| i)
            .collect()
    }

    /// Returns a one-line summary for logs and CLI output.
    pub fn summary(&self) -> String {
        let order = self
            .sequence
            .iter()
            .map(|c| format!("C{c}"))
            .collect::<Vec<_>>()
            .join(" → ");
        if self.safe {
            format!("SAFE: completion order {order}")
        } else {
            format!(
                "UNSAFE: {} of {} customers can finish ({}), blocked: {:?}",
                self.sequence.len(),
                self.finished.len(),
                if order.is_empty() { "none".to_string() } else { order },
                self.blocked(),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_summary() {
        let r = SafetyReport::new(vec![1, 0], vec![true, true]);
        assert!(r.is_safe());
        assert!(r.blocked().is_empty());
        assert_eq!(r.summary(), "SAFE: completion order C1 → C0");
    }

    #[test]
    fn test_unsafe_summary() {
        let r = SafetyReport::new(vec![2], vec![false, false, true]);
        assert!(!r.is_safe());
        assert_eq!(r.blocked(), vec![0, 1]);
        let s = r.summary();
        assert!(s.starts_with("UNSAFE"));
        assert!(s.contains("1 of 3"));
        assert!(s.contains("[0, 1]"));
    }

    #[test]
    fn test_nothing_finishes() {
        let r = SafetyReport::new(vec![], vec![false]);
        assert!(r.summary().contains("(none)"));
    }
}
