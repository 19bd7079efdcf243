// Definitions that are used throughout all modules
use std::cmp::Ordering;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Fractional coordinates (a, b, c) relative to the unit cell vectors
pub type Fractional3D = Vector3<f64>;

/// Tolerance-based comparator for floating point values.
///
/// Two values are equal iff `|a - b| <= tolerance`. Every geometric and numeric
/// comparison in the crate goes through one of these instead of `==`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericComparer {
    tolerance: f64,
}

impl NumericComparer {
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance: tolerance.abs(),
        }
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn equals(&self, a: f64, b: f64) -> bool {
        (a - b).abs() <= self.tolerance
    }

    pub fn is_zero(&self, value: f64) -> bool {
        self.equals(value, 0.0)
    }

    /// Ordering with a dead zone: values inside the tolerance compare as equal
    pub fn compare(&self, a: f64, b: f64) -> Ordering {
        if self.equals(a, b) {
            Ordering::Equal
        } else if a < b {
            Ordering::Less
        } else {
            Ordering::Greater
        }
    }

    /// Returns exact zero for values inside the tolerance, the value otherwise
    pub fn snap_zero(&self, value: f64) -> f64 {
        if self.is_zero(value) {
            0.0
        } else {
            value
        }
    }

    /// Number of entries in `others` that equal `value`
    pub fn count_matches(&self, value: f64, others: &[f64]) -> usize {
        others.iter().filter(|&&other| self.equals(value, other)).count()
    }

    /// Component-wise equality of two 3D vectors
    pub fn vectors_equal(&self, lhs: &Vector3<f64>, rhs: &Vector3<f64>) -> bool {
        lhs.iter().zip(rhs.iter()).all(|(&a, &b)| self.equals(a, b))
    }
}

impl Default for NumericComparer {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_TOLERANCE)
    }
}
