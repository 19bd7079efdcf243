use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

/// 90° in radians
pub const RADIAN_90: f64 = PI / 2.0;
/// 120° in radians
pub const RADIAN_120: f64 = 2.0 * PI / 3.0;

/// Candidate unit-cell metric: lengths a, b, c and angles alpha, beta, gamma (radians).
///
/// A plain value; it is only known to be valid once a constraint family accepted it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricParameterSet {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
}

impl MetricParameterSet {
    pub fn new(a: f64, b: f64, c: f64, alpha: f64, beta: f64, gamma: f64) -> Self {
        Self {
            a,
            b,
            c,
            alpha,
            beta,
            gamma,
        }
    }

    /// Construct with angles given in degrees
    pub fn from_degrees(a: f64, b: f64, c: f64, alpha: f64, beta: f64, gamma: f64) -> Self {
        Self::new(a, b, c, alpha.to_radians(), beta.to_radians(), gamma.to_radians())
    }

    /// Unit lengths and right angles
    pub fn unit_cube() -> Self {
        Self::new(1.0, 1.0, 1.0, RADIAN_90, RADIAN_90, RADIAN_90)
    }

    pub fn with_lengths(self, a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c, ..self }
    }

    pub fn with_angles(self, alpha: f64, beta: f64, gamma: f64) -> Self {
        Self {
            alpha,
            beta,
            gamma,
            ..self
        }
    }

    pub fn lengths(&self) -> [f64; 3] {
        [self.a, self.b, self.c]
    }

    pub fn angles(&self) -> [f64; 3] {
        [self.alpha, self.beta, self.gamma]
    }

    /// Angles converted to degrees
    pub fn angles_in_degrees(&self) -> [f64; 3] {
        self.angles().map(f64::to_degrees)
    }
}

impl Default for MetricParameterSet {
    fn default() -> Self {
        Self::unit_cube()
    }
}
