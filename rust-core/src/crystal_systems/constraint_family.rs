//! Metric rules of the crystal families.
//!
//! The rules are "soft": each family only checks the minimum condition it needs, so a cell
//! of a higher-symmetry family is also accepted by the lower ones (a cubic cell passes the
//! tetragonal, orthorhombic, monoclinic and triclinic checks).

use std::cmp::Ordering;

use log::trace;
use serde::{Deserialize, Serialize};

use super::crystal_family::{CrystalFamily, CrystalFamilyIdentification, TrigonalAxes, UniqueAxis};
use super::parameter_set::{MetricParameterSet, RADIAN_120, RADIAN_90};
use crate::interfaces::NumericComparer;

/// Flags marking which parameters are set by the family's dependency rules
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedParameters {
    pub a: bool,
    pub b: bool,
    pub c: bool,
    pub alpha: bool,
    pub beta: bool,
    pub gamma: bool,
}

impl FixedParameters {
    const fn new(a: bool, b: bool, c: bool, alpha: bool, beta: bool, gamma: bool) -> Self {
        Self {
            a,
            b,
            c,
            alpha,
            beta,
            gamma,
        }
    }
}

impl CrystalFamily {
    /// Overwrite the dependent fields of `set` from its independent ones
    pub fn apply_parameter_dependencies(&self, set: &MetricParameterSet) -> MetricParameterSet {
        let s = *set;
        match self {
            CrystalFamily::Triclinic => s,
            CrystalFamily::Monoclinic(UniqueAxis::A) => s.with_angles(s.alpha, RADIAN_90, RADIAN_90),
            CrystalFamily::Monoclinic(UniqueAxis::B) => s.with_angles(RADIAN_90, s.beta, RADIAN_90),
            CrystalFamily::Monoclinic(UniqueAxis::C) => s.with_angles(RADIAN_90, RADIAN_90, s.gamma),
            CrystalFamily::Orthorhombic => s.with_angles(RADIAN_90, RADIAN_90, RADIAN_90),
            // b stays as given here, unlike the other families with a = b
            CrystalFamily::Tetragonal => s.with_lengths(s.a, s.b, s.c).with_angles(RADIAN_90, RADIAN_90, RADIAN_90),
            CrystalFamily::Trigonal(TrigonalAxes::Hexagonal) | CrystalFamily::Hexagonal => {
                s.with_lengths(s.a, s.a, s.c).with_angles(RADIAN_90, RADIAN_90, RADIAN_120)
            }
            CrystalFamily::Trigonal(TrigonalAxes::Rhombohedral) => {
                s.with_lengths(s.a, s.a, s.a).with_angles(s.alpha, s.alpha, s.alpha)
            }
            CrystalFamily::Cubic => s.with_lengths(s.a, s.a, s.a).with_angles(RADIAN_90, RADIAN_90, RADIAN_90),
        }
    }

    /// Minimum angle condition of the family (radians)
    pub fn validate_soft_angle_condition(&self, comparer: &NumericComparer, alpha: f64, beta: f64, gamma: f64) -> bool {
        let right = |angle: f64| comparer.equals(angle, RADIAN_90);
        match self {
            CrystalFamily::Triclinic => true,
            CrystalFamily::Monoclinic(UniqueAxis::A) => right(beta) && right(gamma),
            CrystalFamily::Monoclinic(UniqueAxis::B) => right(alpha) && right(gamma),
            CrystalFamily::Monoclinic(UniqueAxis::C) => right(alpha) && right(beta),
            CrystalFamily::Orthorhombic | CrystalFamily::Tetragonal | CrystalFamily::Cubic => {
                right(alpha) && right(beta) && right(gamma)
            }
            CrystalFamily::Trigonal(TrigonalAxes::Hexagonal) | CrystalFamily::Hexagonal => {
                right(alpha) && right(beta) && comparer.equals(gamma, RADIAN_120)
            }
            CrystalFamily::Trigonal(TrigonalAxes::Rhombohedral) => comparer.count_matches(alpha, &[beta, gamma]) == 2,
        }
    }

    /// Minimum length condition of the family
    pub fn validate_soft_parameter_condition(&self, comparer: &NumericComparer, a: f64, b: f64, c: f64) -> bool {
        match self {
            CrystalFamily::Triclinic | CrystalFamily::Monoclinic(_) | CrystalFamily::Orthorhombic => true,
            CrystalFamily::Tetragonal | CrystalFamily::Trigonal(TrigonalAxes::Hexagonal) | CrystalFamily::Hexagonal => {
                comparer.equals(a, b)
            }
            CrystalFamily::Trigonal(TrigonalAxes::Rhombohedral) | CrystalFamily::Cubic => {
                comparer.count_matches(a, &[b, c]) == 2
            }
        }
    }

    /// A canonical set that satisfies every rule of the family
    pub fn default_parameter_set(&self) -> MetricParameterSet {
        match self {
            CrystalFamily::Trigonal(TrigonalAxes::Hexagonal) | CrystalFamily::Hexagonal => {
                MetricParameterSet::new(1.0, 1.0, 1.0, RADIAN_90, RADIAN_90, RADIAN_120)
            }
            _ => MetricParameterSet::unit_cube(),
        }
    }

    pub fn fixed_parameters(&self) -> FixedParameters {
        match self {
            CrystalFamily::Triclinic => FixedParameters::default(),
            CrystalFamily::Monoclinic(UniqueAxis::A) => FixedParameters::new(false, false, false, false, true, true),
            CrystalFamily::Monoclinic(UniqueAxis::B) => FixedParameters::new(false, false, false, true, false, true),
            CrystalFamily::Monoclinic(UniqueAxis::C) => FixedParameters::new(false, false, false, true, true, false),
            CrystalFamily::Orthorhombic => FixedParameters::new(false, false, false, true, true, true),
            CrystalFamily::Tetragonal | CrystalFamily::Trigonal(TrigonalAxes::Hexagonal) | CrystalFamily::Hexagonal => {
                FixedParameters::new(false, true, false, true, true, true)
            }
            CrystalFamily::Trigonal(TrigonalAxes::Rhombohedral) => FixedParameters::new(false, true, true, false, true, true),
            CrystalFamily::Cubic => FixedParameters::new(false, true, true, true, true, true),
        }
    }
}

/// A crystal family bound to a comparer and a length bound, holding its accepted metric.
///
/// Invariant: `parameters()` always satisfies the family's angle and parameter conditions.
/// The value is never changed in place; [`MetricConstraintFamily::try_set_parameter_values`]
/// returns a new family value on acceptance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricConstraintFamily {
    family: CrystalFamily,
    comparer: NumericComparer,
    parameter_max: f64,
    parameters: MetricParameterSet,
}

impl MetricConstraintFamily {
    /// Create the family seeded with its default parameter set
    pub fn new(family: CrystalFamily, comparer: NumericComparer, parameter_max: f64) -> Self {
        Self {
            family,
            comparer,
            parameter_max,
            parameters: family.default_parameter_set(),
        }
    }

    pub fn family(&self) -> CrystalFamily {
        self.family
    }

    pub fn identification(&self) -> CrystalFamilyIdentification {
        self.family.identification()
    }

    pub fn name(&self) -> &'static str {
        self.family.name()
    }

    pub fn comparer(&self) -> &NumericComparer {
        &self.comparer
    }

    pub fn parameter_max(&self) -> f64 {
        self.parameter_max
    }

    /// The currently accepted metric
    pub fn parameters(&self) -> &MetricParameterSet {
        &self.parameters
    }

    pub fn fixed_parameters(&self) -> FixedParameters {
        self.family.fixed_parameters()
    }

    pub fn default_parameter_set(&self) -> MetricParameterSet {
        self.family.default_parameter_set()
    }

    pub fn apply_parameter_dependencies(&self, set: &MetricParameterSet) -> MetricParameterSet {
        self.family.apply_parameter_dependencies(set)
    }

    pub fn validate_soft_angle_condition(&self, alpha: f64, beta: f64, gamma: f64) -> bool {
        self.family.validate_soft_angle_condition(&self.comparer, alpha, beta, gamma)
    }

    pub fn validate_soft_parameter_condition(&self, a: f64, b: f64, c: f64) -> bool {
        self.family.validate_soft_parameter_condition(&self.comparer, a, b, c)
    }

    /// Family independent check that three angles can span a cell.
    ///
    /// Both inequalities are strict beyond the tolerance, so a nearly flat cell is rejected.
    pub fn validate_general_angle_condition(&self, alpha: f64, beta: f64, gamma: f64) -> bool {
        let cos_alpha = alpha.cos();
        let (lower, upper) = ((beta + gamma).cos(), (beta - gamma).cos());
        let below = |x: f64, y: f64| self.comparer.compare(x, y) == Ordering::Less;
        (below(lower, cos_alpha) && below(cos_alpha, upper)) || (below(upper, cos_alpha) && below(cos_alpha, lower))
    }

    /// Every length has to lie in (0, parameter_max]
    pub fn validate_parameter_bounds(&self, a: f64, b: f64, c: f64) -> bool {
        [a, b, c]
            .iter()
            .all(|&length| length > 0.0 && !self.comparer.is_zero(length) && length <= self.parameter_max)
    }

    /// General and soft angle conditions
    pub fn validate_angle_conditions(&self, alpha: f64, beta: f64, gamma: f64) -> bool {
        self.validate_general_angle_condition(alpha, beta, gamma) && self.validate_soft_angle_condition(alpha, beta, gamma)
    }

    /// Length bounds and soft parameter condition
    pub fn validate_parameter_conditions(&self, a: f64, b: f64, c: f64) -> bool {
        self.validate_parameter_bounds(a, b, c) && self.validate_soft_parameter_condition(a, b, c)
    }

    pub fn is_valid(&self, set: &MetricParameterSet) -> bool {
        self.validate_angle_conditions(set.alpha, set.beta, set.gamma) && self.validate_parameter_conditions(set.a, set.b, set.c)
    }

    /// Validate `candidate` and, if accepted, return a family carrying the dependency-corrected set.
    ///
    /// Returns `None` when any condition fails; `self` is never modified.
    pub fn try_set_parameter_values(&self, candidate: &MetricParameterSet) -> Option<Self> {
        if !self.is_valid(candidate) {
            trace!("{} rejected parameter set {:?}", self.family, candidate);
            return None;
        }
        Some(Self {
            parameters: self.apply_parameter_dependencies(candidate),
            ..*self
        })
    }
}
