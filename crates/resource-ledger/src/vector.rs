// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Per-resource unit counts.
//!
//! A [`ResourceVector`] holds one non-negative count per resource type. It is
//! the unit of every ledger row (Available, Maximum, Allocation, Need) and of
//! every request or release a customer makes.

use crate::LedgerError;
use std::fmt;
use std::ops::Index;

/// One unit count per resource type.
///
/// # Parsing
/// [`ResourceVector::parse_args`] accepts process-argument style input, either
/// one count per argument or comma-separated:
///
/// ```
/// use resource_ledger::ResourceVector;
///
/// let a = ResourceVector::parse_args(&["10", "5", "7"]).unwrap();
/// let b = ResourceVector::parse_args(&["10,5,7"]).unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.as_slice(), &[10, 5, 7]);
///
/// assert!(ResourceVector::parse_args(&["10", "-1"]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ResourceVector(Vec<u32>);

impl ResourceVector {
    /// Wraps raw unit counts.
    pub fn new(units: Vec<u32>) -> Self {
        Self(units)
    }

    /// A vector of `len` zero counts.
    pub fn zeros(len: usize) -> Self {
        Self(vec![0; len])
    }

    /// Parses unit counts from command-line style arguments.
    ///
    /// Each argument may hold one count or several separated by commas.
    /// Negative and non-numeric entries are rejected, as is empty input.
    pub fn parse_args<S: AsRef<str>>(args: &[S]) -> Result<Self, LedgerError> {
        let mut units = Vec::new();
        for arg in args {
            for part in arg.as_ref().split(',') {
                let part = part.trim();
                if part.is_empty() {
                    continue;
                }
                units.push(parse_count(part)?);
            }
        }

        if units.is_empty() {
            return Err(LedgerError::EmptyVector);
        }
        Ok(Self(units))
    }

    /// Number of resource types.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the vector tracks no resource types.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &u32> {
        self.0.iter()
    }

    /// Returns `true` if every count is zero.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&u| u == 0)
    }

    /// Sum of all counts, widened so it cannot overflow.
    pub fn total_units(&self) -> u64 {
        self.0.iter().map(|&u| u64::from(u)).sum()
    }

    /// Fails with [`LedgerError::DimensionMismatch`] unless the vector has
    /// exactly `expected` entries.
    pub fn expect_len(&self, expected: usize, context: &str) -> Result<(), LedgerError> {
        if self.len() != expected {
            return Err(LedgerError::DimensionMismatch {
                context: context.to_string(),
                expected,
                actual: self.len(),
            });
        }
        Ok(())
    }

    /// Returns `true` if `self[j] <= bound[j]` for every resource type.
    ///
    /// Vectors of different lengths never fit.
    pub fn fits_within(&self, bound: &ResourceVector) -> bool {
        self.len() == bound.len() && self.0.iter().zip(&bound.0).all(|(a, b)| a <= b)
    }

    /// The first resource type where `self` exceeds `bound`, as
    /// `(resource, self[resource], bound[resource])`.
    pub fn first_excess(&self, bound: &ResourceVector) -> Option<(usize, u32, u32)> {
        self.0
            .iter()
            .zip(&bound.0)
            .enumerate()
            .find(|(_, (a, b))| a > b)
            .map(|(j, (&a, &b))| (j, a, b))
    }

    /// Element-wise sum, or `None` on overflow or length mismatch.
    pub fn checked_add(&self, other: &ResourceVector) -> Option<ResourceVector> {
        if self.len() != other.len() {
            return None;
        }
        self.0
            .iter()
            .zip(&other.0)
            .map(|(a, b)| a.checked_add(*b))
            .collect::<Option<Vec<_>>>()
            .map(Self)
    }

    /// Element-wise difference, or `None` if any entry would go negative.
    pub fn checked_sub(&self, other: &ResourceVector) -> Option<ResourceVector> {
        if self.len() != other.len() {
            return None;
        }
        self.0
            .iter()
            .zip(&other.0)
            .map(|(a, b)| a.checked_sub(*b))
            .collect::<Option<Vec<_>>>()
            .map(Self)
    }

    /// Adds `other` in place, saturating at `u32::MAX`.
    pub fn saturating_add_assign(&mut self, other: &ResourceVector) {
        for (a, b) in self.0.iter_mut().zip(&other.0) {
            *a = a.saturating_add(*b);
        }
    }
}

fn parse_count(s: &str) -> Result<u32, LedgerError> {
    if s.starts_with('-') {
        return Err(LedgerError::MalformedVector {
            input: s.to_string(),
            reason: "resource counts cannot be negative".into(),
        });
    }
    s.parse::<u32>().map_err(|e| LedgerError::MalformedVector {
        input: s.to_string(),
        reason: e.to_string(),
    })
}

impl From<Vec<u32>> for ResourceVector {
    fn from(units: Vec<u32>) -> Self {
        Self(units)
    }
}

impl<const N: usize> From<[u32; N]> for ResourceVector {
    fn from(units: [u32; N]) -> Self {
        Self(units.to_vec())
    }
}

impl FromIterator<u32> for ResourceVector {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Index<usize> for ResourceVector {
    type Output = u32;

    fn index(&self, resource: usize) -> &u32 {
        &self.0[resource]
    }
}

impl fmt::Display for ResourceVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (j, units) in self.0.iter().enumerate() {
            if j > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{units}")?;
        }
        write!(f, "]")
    }
}
