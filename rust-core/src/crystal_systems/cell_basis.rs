use anyhow::{Error, Ok};
use nalgebra::{Matrix3, Vector3};

use super::constraint_family::MetricConstraintFamily;
use super::parameter_set::MetricParameterSet;
use crate::interfaces::NumericComparer;
use crate::math::try_invert;

/// Cartesian cell vectors built from a metric parameter set.
///
/// Convention: a along x, b in the xy-plane, c completes the right-handed cell.
#[derive(Debug, Clone)]
pub struct CellBasis {
    base_matrix: Matrix3<f64>,
    inverse: Matrix3<f64>,
    comparer: NumericComparer,
}

impl CellBasis {
    pub fn from_parameters(set: &MetricParameterSet, comparer: &NumericComparer) -> Result<Self, Error> {
        let (cos_alpha, cos_beta, cos_gamma) = (set.alpha.cos(), set.beta.cos(), set.gamma.cos());
        let sin_gamma = set.gamma.sin();
        if comparer.is_zero(sin_gamma) {
            return Err(Error::msg("Gamma is 0° or 180°; a and b would be collinear."));
        }

        let base_1 = Vector3::new(set.a, 0.0, 0.0);
        let base_2 = Vector3::new(comparer.snap_zero(set.b * cos_gamma), comparer.snap_zero(set.b * sin_gamma), 0.0);

        let c_x = comparer.snap_zero(set.c * cos_beta);
        let c_y = comparer.snap_zero(set.c * (cos_alpha - cos_beta * cos_gamma) / sin_gamma);
        let c_z_squared = set.c * set.c - c_x * c_x - c_y * c_y;
        if c_z_squared <= 0.0 || comparer.is_zero(c_z_squared) {
            return Err(Error::msg("The angles cannot span a cell; c would lie in the ab-plane."));
        }
        let base_3 = Vector3::new(c_x, c_y, comparer.snap_zero(c_z_squared.sqrt()));

        Self::from_base_vectors(base_1, base_2, base_3, comparer)
    }

    /// Build from the parameters currently accepted by a family
    pub fn from_family(family: &MetricConstraintFamily) -> Result<Self, Error> {
        Self::from_parameters(family.parameters(), family.comparer())
    }

    pub fn from_base_vectors(
        base_1: Vector3<f64>,
        base_2: Vector3<f64>,
        base_3: Vector3<f64>,
        comparer: &NumericComparer,
    ) -> Result<Self, Error> {
        let base_matrix = Matrix3::from_columns(&[base_1, base_2, base_3]);

        // Linearly non-dependent
        if comparer.is_zero(base_matrix.determinant()) {
            return Err(Error::msg(
                "Determinant too small. Vectors are either too small or linearly dependent.",
            ));
        }

        let inverse = try_invert(&base_matrix, comparer)
            .ok_or_else(|| Error::msg("Base matrix cannot be inverted within tolerance."))?;

        Ok(CellBasis {
            base_matrix,
            inverse,
            comparer: *comparer,
        })
    }

    pub fn base_matrix(&self) -> &Matrix3<f64> {
        &self.base_matrix
    }

    pub fn inverse(&self) -> &Matrix3<f64> {
        &self.inverse
    }

    pub fn base_vectors(&self) -> [Vector3<f64>; 3] {
        [
            self.base_matrix.column(0).into_owned(),
            self.base_matrix.column(1).into_owned(),
            self.base_matrix.column(2).into_owned(),
        ]
    }

    /// Metric tensor G = A^T * A
    pub fn metric(&self) -> Matrix3<f64> {
        self.base_matrix.transpose() * self.base_matrix
    }

    pub fn volume(&self) -> f64 {
        self.base_matrix.determinant().abs()
    }

    pub fn to_cartesian(&self, fractional: &Vector3<f64>) -> Vector3<f64> {
        (self.base_matrix * fractional).map(|value| self.comparer.snap_zero(value))
    }

    pub fn to_fractional(&self, cartesian: &Vector3<f64>) -> Vector3<f64> {
        (self.inverse * cartesian).map(|value| self.comparer.snap_zero(value))
    }

    /// Recover lengths and angles from the metric tensor
    pub fn parameters(&self) -> MetricParameterSet {
        let metric = self.metric();
        let a = metric[(0, 0)].sqrt();
        let b = metric[(1, 1)].sqrt();
        let c = metric[(2, 2)].sqrt();
        let alpha = (metric[(1, 2)] / (b * c)).clamp(-1.0, 1.0).acos();
        let beta = (metric[(0, 2)] / (a * c)).clamp(-1.0, 1.0).acos();
        let gamma = (metric[(0, 1)] / (a * b)).clamp(-1.0, 1.0).acos();
        MetricParameterSet::new(a, b, c, alpha, beta, gamma)
    }
}
