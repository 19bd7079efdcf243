use std::fmt;
use std::str::FromStr;

use anyhow::{bail, Error};
use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_TRIM_TOLERANCE;
use crate::interfaces::{Fractional3D, NumericComparer};
use crate::math::try_invert;

/// A single space-group symmetry operation: integer linear part + fractional translation.
///
/// Values are immutable once built. Shifting or composing returns a new operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymmetryOperation {
    /// Linear part with crystallographic entries (usually -1, 0, 1) and determinant ±1
    pub rotation: Matrix3<i8>,
    /// Fractional translation shift
    pub translation: Vector3<f64>,
    /// Range within which transformed coordinates snap onto integers
    pub trim_tolerance: f64,
}

impl SymmetryOperation {
    /// Create a new symmetry operation with the default trim tolerance
    pub fn new(rotation: Matrix3<i8>, translation: Vector3<f64>) -> Self {
        Self {
            rotation,
            translation,
            trim_tolerance: DEFAULT_TRIM_TOLERANCE,
        }
    }

    /// Create identity operation
    pub fn identity() -> Self {
        Self::new(Matrix3::identity(), Vector3::zeros())
    }

    pub fn with_trim_tolerance(self, trim_tolerance: f64) -> Self {
        Self {
            trim_tolerance: trim_tolerance.abs(),
            ..self
        }
    }

    /// Parse the coordinate-triplet notation, e.g. `-y,x-y,z+1/3`
    pub fn from_xyz(literal: &str) -> Result<Self, Error> {
        let components: Vec<&str> = literal.split(',').collect();
        if components.len() != 3 {
            bail!("Operation '{}' needs three comma separated components", literal);
        }

        let mut rows = [[0i8; 3]; 3];
        let mut translation = Vector3::zeros();
        for (i, component) in components.iter().enumerate() {
            let (row, shift) = parse_component(component)
                .map_err(|err| Error::msg(format!("Invalid operation '{}': {}", literal, err)))?;
            rows[i] = row;
            translation[i] = shift;
        }

        let rotation = Matrix3::new(
            rows[0][0], rows[0][1], rows[0][2], //
            rows[1][0], rows[1][1], rows[1][2], //
            rows[2][0], rows[2][1], rows[2][2],
        );
        Ok(Self::new(rotation, translation))
    }

    /// Render the coordinate-triplet notation
    pub fn to_xyz(&self) -> String {
        (0..3)
            .map(|i| {
                let row = [self.rotation[(i, 0)], self.rotation[(i, 1)], self.rotation[(i, 2)]];
                format_component(row, self.translation[i], self.trim_tolerance)
            })
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Linear part as a floating point matrix
    pub fn linear(&self) -> Matrix3<f64> {
        self.rotation.map(|x| x as f64)
    }

    /// Apply to a point. Coordinates within the trim tolerance of an integer snap onto it;
    /// the result is not wrapped into the unit cell.
    pub fn apply(&self, point: Fractional3D) -> Fractional3D {
        (self.linear() * point + self.translation).map(|value| snap_to_integer(value, self.trim_tolerance))
    }

    /// Apply and wrap the result into [0, 1)
    pub fn apply_with_trim(&self, point: Fractional3D) -> Fractional3D {
        wrap_to_unit_cell(&self.apply(point), self.trim_tolerance)
    }

    /// Lazily apply to every point of a sequence, keeping the order
    pub fn transform<'a>(&'a self, sequence: &'a [Fractional3D]) -> impl Iterator<Item = Fractional3D> + Clone + 'a {
        sequence.iter().map(move |point| self.apply(*point))
    }

    /// Same linear part, translation moved by `shift`
    pub fn with_shift(&self, shift: &Vector3<f64>) -> Self {
        Self {
            translation: self.translation + shift,
            ..self.clone()
        }
    }

    /// Operation that applies `other` first and `self` second
    pub fn compose(&self, other: &Self) -> Self {
        Self {
            rotation: self.rotation * other.rotation,
            translation: self.linear() * other.translation + self.translation,
            trim_tolerance: self.trim_tolerance,
        }
    }

    /// Inverse operation. Fails for linear parts without an integer inverse.
    pub fn inverse(&self) -> Result<Self, Error> {
        let comparer = NumericComparer::new(self.trim_tolerance);
        let Some(inverse) = try_invert(&self.linear(), &comparer) else {
            bail!("Linear part of '{}' is singular", self.to_xyz());
        };
        if inverse.iter().any(|value| !comparer.equals(*value, value.round())) {
            bail!("Linear part of '{}' has no integer inverse", self.to_xyz());
        }

        let rotation = inverse.map(|value| value.round() as i8);
        let translation = -(rotation.map(|x| x as f64) * self.translation);
        Ok(Self {
            rotation,
            translation: translation.map(|value| comparer.snap_zero(value)),
            trim_tolerance: self.trim_tolerance,
        })
    }

    /// Check if this is the identity operation
    pub fn is_identity(&self) -> bool {
        self.rotation == Matrix3::identity() && self.translation.norm() <= self.trim_tolerance
    }

    /// Same linear part and translation within the comparer's tolerance
    pub fn equals(&self, other: &Self, comparer: &NumericComparer) -> bool {
        self.rotation == other.rotation && comparer.vectors_equal(&self.translation, &other.translation)
    }
}

impl fmt::Display for SymmetryOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_xyz())
    }
}

impl FromStr for SymmetryOperation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_xyz(s)
    }
}

/// Wrap every coordinate into [0, 1). Values within `tolerance` of 0 or 1 become 0.
pub fn wrap_to_unit_cell(point: &Fractional3D, tolerance: f64) -> Fractional3D {
    point.map(|value| {
        let wrapped = value.rem_euclid(1.0);
        if wrapped <= tolerance || (1.0 - wrapped) <= tolerance {
            0.0
        } else {
            wrapped
        }
    })
}

fn snap_to_integer(value: f64, tolerance: f64) -> f64 {
    let nearest = value.round();
    if (value - nearest).abs() <= tolerance {
        // Adding zero turns -0.0 into 0.0
        nearest + 0.0
    } else {
        value
    }
}

fn parse_component(component: &str) -> Result<([i8; 3], f64), Error> {
    let cleaned: String = component
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase();
    if cleaned.is_empty() {
        bail!("empty component");
    }

    // Split before every sign that does not start the current term
    let mut terms = Vec::new();
    let mut start = 0;
    for (i, ch) in cleaned.char_indices() {
        if (ch == '+' || ch == '-') && i > start {
            terms.push(&cleaned[start..i]);
            start = i;
        }
    }
    terms.push(&cleaned[start..]);

    let mut row = [0i8; 3];
    let mut shift = 0.0;
    for term in terms {
        let (sign, body) = match term.as_bytes()[0] {
            b'-' => (-1.0, &term[1..]),
            b'+' => (1.0, &term[1..]),
            _ => (1.0, term),
        };
        if body.is_empty() {
            bail!("dangling sign in '{}'", component);
        }

        let axis = match body.chars().last() {
            Some('x') => Some(0),
            Some('y') => Some(1),
            Some('z') => Some(2),
            _ => None,
        };

        match axis {
            Some(axis) => {
                let prefix = body[..body.len() - 1].trim_end_matches('*');
                let coefficient: i8 = if prefix.is_empty() {
                    1
                } else {
                    prefix.parse().map_err(|_| Error::msg(format!("bad coefficient '{}'", prefix)))?
                };
                row[axis] += if sign < 0.0 { -coefficient } else { coefficient };
            }
            None => shift += sign * parse_number(body)?,
        }
    }
    Ok((row, shift))
}

fn parse_number(text: &str) -> Result<f64, Error> {
    let bad_number = || Error::msg(format!("bad number '{}'", text));
    match text.split_once('/') {
        Some((numerator, denominator)) => {
            let numerator: f64 = numerator.parse().map_err(|_| bad_number())?;
            let denominator: f64 = denominator.parse().map_err(|_| bad_number())?;
            if denominator == 0.0 {
                bail!("zero denominator in '{}'", text);
            }
            Ok(numerator / denominator)
        }
        None => text.parse().map_err(|_| bad_number()),
    }
}

fn format_component(row: [i8; 3], shift: f64, tolerance: f64) -> String {
    let mut out = String::new();
    for (&coefficient, axis) in row.iter().zip(['x', 'y', 'z']) {
        match coefficient {
            0 => continue,
            1 if out.is_empty() => {}
            1 => out.push('+'),
            -1 => out.push('-'),
            c => {
                if c > 0 && !out.is_empty() {
                    out.push('+');
                }
                out.push_str(&c.to_string());
            }
        }
        out.push(axis);
    }

    if shift.abs() > tolerance {
        if shift > 0.0 && !out.is_empty() {
            out.push('+');
        }
        out.push_str(&format_fraction(shift));
    }

    if out.is_empty() {
        out.push('0');
    }
    out
}

fn format_fraction(value: f64) -> String {
    for denominator in [1i64, 2, 3, 4, 6, 8, 12] {
        let numerator = value * denominator as f64;
        if (numerator - numerator.round()).abs() < 1e-6 {
            let numerator = numerator.round() as i64;
            return if denominator == 1 {
                numerator.to_string()
            } else {
                format!("{}/{}", numerator, denominator)
            };
        }
    }
    value.to_string()
}
